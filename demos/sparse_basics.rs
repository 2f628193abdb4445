use faer::Mat;
use sparsix::{Operand, SparseMatrix, SparseVector, sparse_matrix, sparse_vector};

fn main() -> Result<(), sparsix::SpError> {
    let a: SparseMatrix<f64> = sparse_matrix![[1.0, 0.0, 2.0], [3.0, 0.0, 0.0], [0.0, 4.0, 5.0]];
    println!("A = {a}, nnz = {}", a.nnz());
    println!("A[2, -1] = {}", a.element(2, -1)?);

    // product against the transpose, then against a dense faer matrix
    let at = a.transpose();
    let aat = (&a * &at)?;
    println!("A * Aᵀ = {aat}");

    let dense = Mat::from_fn(3, 2, |i, j| (i + j) as f64);
    let mixed = a.mul_operand(Operand::from(&dense))?;
    println!("A * D = {mixed:?}");

    // rows come back as sparse vectors
    let r: SparseVector<f64> = a.row(-1)?;
    let v = sparse_vector![0.0, 1.0, 1.0];
    println!("row 2 = {r}, row 2 · v = {}", r.inner_product(&v)?);
    println!("|row 2| = {}", r.norm());

    let sum = (&a + &a.to_column_major())?;
    println!("A + A = {sum}");
    Ok(())
}
