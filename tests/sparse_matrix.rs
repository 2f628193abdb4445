//! Tests for sparse matrix construction, row and column access, traversal
//! order, orientation handling and arithmetic.
//!
//! Storage layout is checked through `storage()` so the tests can assert
//! that zeros are never stored and that orientation is what the constructor
//! promises.

use std::collections::BTreeMap;

use sparsix::{
    Operand, SpError, SparseMatrix, SparseOptions, SparseVector, Storage, StorageOrder, Value,
    sparse_matrix, sparse_vector,
};

/// Stored entries as nested `(outer, [(inner, value)])` lists.
fn layout(m: &SparseMatrix<i64>) -> Vec<(usize, Vec<(usize, i64)>)> {
    m.storage()
        .outer()
        .iter()
        .map(|(&k, inner)| (k, inner.iter().collect()))
        .collect()
}

fn tall() -> Vec<[i64; 3]> {
    vec![
        [1, 3, 0],
        [0, 0, 4],
        [3, 9, 0],
        [0, 0, 5],
        [6, 0, 0],
        [2, 0, 6],
        [0, 4, 0],
    ]
}

fn small() -> SparseMatrix<i64> {
    SparseMatrix::rows(&[[1, 3, 0], [0, 0, 4], [3, 9, 0]])
}

/// Dense rows are stored row-major with zeros dropped.
#[test]
fn creation_from_rows() {
    let m: SparseMatrix<i64> = sparse_matrix![[1, 0, 2], [3, 0, 0], [0, 4, 5]];
    assert_eq!(m.shape(), (3, 3));
    assert_eq!(m.nnz(), 5);
    assert_eq!(m.element(0, 2), Ok(2));
    assert_eq!(m.element(1, 1), Ok(0));
    assert_eq!(
        layout(&m),
        vec![
            (0, vec![(0, 1), (2, 2)]),
            (1, vec![(0, 3)]),
            (2, vec![(1, 4), (2, 5)]),
        ]
    );
}

/// A nested row map builds the same matrix as the dense rows.
#[test]
fn creation_from_row_map() {
    let mut rows: BTreeMap<usize, BTreeMap<usize, i64>> = BTreeMap::new();
    rows.insert(0, [(0, 1), (2, 2)].into_iter().collect());
    rows.insert(1, [(0, 3)].into_iter().collect());
    rows.insert(2, [(1, 4), (2, 5)].into_iter().collect());
    let m = SparseMatrix::from_row_map_ref(&rows, None).unwrap();
    assert_eq!(m, sparse_matrix![[1, 0, 2], [3, 0, 0], [0, 4, 5]]);
    assert_eq!(m.nnz(), 5);
}

/// Columns are stored column-major keyed by column index.
#[test]
fn creation_from_columns() {
    let m = SparseMatrix::columns(&[[1i64, 0], [3, 0], [0, 4]]);
    assert_eq!(m.shape(), (2, 3));
    assert!(matches!(m.storage(), Storage::ColumnMajor(_)));
    assert_eq!(layout(&m), vec![(0, vec![(0, 1)]), (1, vec![(0, 3)]), (2, vec![(1, 4)])]);
    assert_eq!(m.nnz(), 3);
}

/// `scalar`, `identity` and `zero` fill only the diagonal, if anything.
#[test]
fn diagonal_family() {
    let s = SparseMatrix::scalar(3, 4i64);
    assert_eq!(layout(&s), vec![(0, vec![(0, 4)]), (1, vec![(1, 4)]), (2, vec![(2, 4)])]);
    let i = SparseMatrix::<i64>::identity(3);
    assert_eq!(i, SparseMatrix::unit(3));
    assert_eq!(i.nnz(), 3);
    let z = SparseMatrix::<i64>::zero(3);
    assert_eq!(z.shape(), (3, 3));
    assert!(layout(&z).is_empty());
}

/// Scenario: `diagonal(3,4,0,9,0)`.
#[test]
fn diagonal_with_zeros() {
    let m = SparseMatrix::diagonal(&[3i64, 4, 0, 9, 0]);
    assert_eq!(m.shape(), (5, 5));
    assert_eq!(layout(&m), vec![(0, vec![(0, 3)]), (1, vec![(1, 4)]), (3, vec![(3, 9)])]);
    assert_eq!(m.nnz(), 3);
}

/// Row and column vectors from dense and sparse input.
#[test]
fn row_and_column_vectors() {
    let r = SparseMatrix::row_vector(&[1i64, 3, 0, 0, 6]);
    assert_eq!(r.shape(), (1, 5));
    assert_eq!(layout(&r), vec![(0, vec![(0, 1), (1, 3), (4, 6)])]);

    let sparse = SparseVector::from_map([(0, 1i64), (1, 3), (4, 6)].into_iter().collect(), None).unwrap();
    let c = SparseMatrix::column_vector_from(&sparse);
    assert_eq!(c.shape(), (5, 1));
    assert_eq!(layout(&c), vec![(0, vec![(0, 1)]), (1, vec![(0, 3)]), (4, vec![(0, 6)])]);
    assert_eq!(c, SparseMatrix::column_vector(&[1, 3, 0, 0, 6]));
}

/// `empty` needs one zero dimension and stores nothing.
#[test]
fn empty_matrices() {
    let a = SparseMatrix::<i64>::empty(3, 0).unwrap();
    assert_eq!(a.shape(), (3, 0));
    assert_eq!(a.nnz(), 0);
    let b = SparseMatrix::<i64>::empty(0, 4).unwrap();
    assert_eq!(b.shape(), (0, 4));
    assert!(b.is_empty());
    assert!(SparseMatrix::<i64>::rows::<[i64; 0]>(&[]).is_empty());
    assert!(!small().is_empty());
}

/// Scenario: empty-matrix arithmetic.
#[test]
fn empty_arithmetic() {
    let a = SparseMatrix::<i64>::empty(3, 0).unwrap();
    let b = SparseMatrix::<i64>::empty(3, 0).unwrap();
    assert_eq!((&a + &b).unwrap(), a);

    let left = SparseMatrix::<i64>::empty(2, 0).unwrap();
    let right = SparseMatrix::<i64>::empty(0, 3).unwrap();
    let product = (&left * &right).unwrap();
    assert_eq!(product.shape(), (2, 3));
    assert_eq!(product.nnz(), 0);
}

/// Element access reads zeros and rejects out-of-range positions.
#[test]
fn element_access() {
    let m: SparseMatrix<i64> = sparse_matrix![[1, 0, 2], [3, 0, 0], [0, 4, 5]];
    let expected = [[1, 0, 2], [3, 0, 0], [0, 4, 5]];
    for (i, row) in expected.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            assert_eq!(m.element(i as isize, j as isize), Ok(v));
        }
    }
    assert!(matches!(m.element(3, 3), Err(SpError::OutOfRange { .. })));
}

/// Rows with positive and negative indices.
#[test]
fn row_snapshots() {
    let m = SparseMatrix::rows(&tall());
    assert_eq!(m.row(0).unwrap(), sparse_vector![1, 3, 0]);
    assert_eq!(m.row(2).unwrap(), sparse_vector![3, 9, 0]);
    assert_eq!(m.row(-1).unwrap(), sparse_vector![0, 4, 0]);
    assert_eq!(m.row(-3).unwrap(), sparse_vector![6, 0, 0]);
    assert_eq!(m.row_nonzero(-3).unwrap(), m.row(-3).unwrap());
    assert!(m.row(7).is_err());
}

/// Columns from a column-built matrix mirror the row case.
#[test]
fn column_snapshots() {
    let m = SparseMatrix::columns(&tall());
    assert_eq!(m.column(0).unwrap(), sparse_vector![1, 3, 0]);
    assert_eq!(m.column(2).unwrap(), sparse_vector![3, 9, 0]);
    assert_eq!(m.column(-1).unwrap(), sparse_vector![0, 4, 0]);
    assert_eq!(m.column_nonzero(-3).unwrap(), sparse_vector![6, 0, 0]);
}

/// Dense row callbacks see zeros, non-zero callbacks do not.
#[test]
fn row_callbacks() {
    let m = small();
    let mut sum = 0;
    m.row_each(0, |v| sum += v).unwrap();
    assert_eq!(sum, 4);

    let mut zeros = 0;
    m.row_each(-2, |v| zeros += (v == 0) as i32).unwrap();
    assert_eq!(zeros, 2);

    let mut count = 0;
    m.row_each_nonzero(0, |_| count += 1).unwrap();
    assert_eq!(count, 2);

    let mut zeros = 0;
    m.row_each_nonzero(-1, |v| zeros += (v == 0) as i32).unwrap();
    assert_eq!(zeros, 0);
}

/// Column callbacks on column-major storage.
#[test]
fn column_callbacks() {
    let m = SparseMatrix::columns(&[[1i64, 3, 0], [0, 0, 4], [3, 9, 0]]);
    let mut sum = 0;
    m.column_each(0, |v| sum += v).unwrap();
    assert_eq!(sum, 4);

    let mut zeros = 0;
    m.column_each(-2, |v| zeros += (v == 0) as i32).unwrap();
    assert_eq!(zeros, 2);

    let mut count = 0;
    m.column_each_nonzero(0, |_| count += 1).unwrap();
    assert_eq!(count, 2);
}

/// `collect` sees every position, `collect_nonzero` only stored ones.
#[test]
fn collect_variants() {
    let m = small();
    let shifted = m.collect(|v| v - 3);
    assert_eq!(shifted, SparseMatrix::rows(&[[-2, 0, -3], [-3, -3, 1], [0, 6, -3]]));
    let shifted_nz = m.collect_nonzero(|v| v - 3);
    assert_eq!(shifted_nz, SparseMatrix::rows(&[[-2, 0, 0], [0, 0, 1], [0, 6, 0]]));
}

/// `each` visits `row_size × column_size` values, `each_nonzero` only nnz.
#[test]
fn each_counts() {
    let m = small();
    let (mut nz, mut z) = (0, 0);
    m.each(|v| if v == 0 { z += 1 } else { nz += 1 });
    assert_eq!((nz, z), (5, 4));

    let (mut nz, mut z) = (0, 0);
    m.each_nonzero(|v| if v == 0 { z += 1 } else { nz += 1 });
    assert_eq!((nz, z), (5, 0));
}

/// Indexed traversals run in row-major order for either storage.
#[test]
fn each_with_index_order() {
    for m in [small(), small().to_column_major()] {
        let mut all = Vec::new();
        m.each_with_index(|i, j, v| all.push((i, j, v)));
        assert_eq!(
            all,
            vec![
                (0, 0, 1),
                (0, 1, 3),
                (0, 2, 0),
                (1, 0, 0),
                (1, 1, 0),
                (1, 2, 4),
                (2, 0, 3),
                (2, 1, 9),
                (2, 2, 0),
            ]
        );

        let mut stored = Vec::new();
        m.each_with_index_nonzero(|i, j, v| stored.push((i, j, v)));
        assert_eq!(stored, vec![(0, 0, 1), (0, 1, 3), (1, 2, 4), (2, 0, 3), (2, 1, 9)]);
    }
}

/// Square means equal dimensions.
#[test]
fn square() {
    assert!(SparseMatrix::rows(&[[1i64, 0, 0], [3, 0, 0], [0, 4, 0]]).is_square());
    assert!(!SparseMatrix::rows(&[[1i64, 0], [3, 0], [0, 4]]).is_square());
}

/// Scenario: transpose of a 3×2 matrix.
#[test]
fn transpose() {
    let m = SparseMatrix::rows(&[[1i64, 0], [3, 0], [0, 4]]);
    assert_eq!(m.shape(), (3, 2));
    let t = m.transpose();
    assert_eq!(t.shape(), (2, 3));
    assert_eq!(t, SparseMatrix::rows(&[[1, 3, 0], [0, 0, 4]]));
    assert_eq!(t.order(), StorageOrder::ColumnMajor);
}

/// Scenario: multiplication by a number.
#[test]
fn multiplication_by_number() {
    let m = SparseMatrix::rows(&[[1i64, 0], [3, 0], [0, 4]]);
    assert_eq!(&m * 2i64, sparse_matrix![[2, 0], [6, 0], [0, 8]]);
    assert_eq!(
        m.mul_operand(Operand::Scalar(2)),
        Ok(Value::Matrix(sparse_matrix![[2, 0], [6, 0], [0, 8]]))
    );
}

/// The sparse product agrees with the dense product.
#[test]
fn multiplication_by_matrix() {
    let a = [[1i64, 0], [3, 0], [0, 4]];
    let b = [[4i64, 0, 0, 5], [2, 0, 7, 0]];
    let mut dense = vec![vec![0i64; 4]; 3];
    for i in 0..3 {
        for j in 0..4 {
            for k in 0..2 {
                dense[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    let product = (&SparseMatrix::rows(&a) * &SparseMatrix::rows(&b)).unwrap();
    assert_eq!(product, SparseMatrix::from_dense(&dense));
}

/// Product shape mismatch is a dimension error.
#[test]
fn multiplication_shape_mismatch() {
    let a = SparseMatrix::<i64>::identity(3);
    let b = SparseMatrix::<i64>::identity(2);
    assert!(matches!(&a * &b, Err(SpError::DimensionMismatch(_))));
}

/// Matrix times a vector treats the vector as a column.
#[test]
fn multiplication_by_vector() {
    let m = small();
    let v = sparse_vector![1, 0, 2];
    let out = m.mul_operand(Operand::Vector(&v)).unwrap().into_matrix().unwrap();
    assert_eq!(out, SparseMatrix::column_vector(&[1, 8, 3]));
}

/// Column-major results come back when requested.
#[test]
fn product_with_options() {
    let opts = SparseOptions::default()
        .with_order(StorageOrder::ColumnMajor)
        .with_parallel_threshold(1);
    let p = small().matmul_with(&SparseMatrix::identity(3), &opts).unwrap();
    assert_eq!(p.order(), StorageOrder::ColumnMajor);
    assert_eq!(p, small());
}

/// Addition and subtraction across mixed orientations.
#[test]
fn addition_mixed_orientation() {
    let a = small();
    let b = small().to_column_major();
    let sum = (&a + &b).unwrap();
    assert_eq!(sum, &a * 2i64);
    assert_eq!(sum.order(), StorageOrder::RowMajor);
    let diff = (&b - &a).unwrap();
    assert_eq!(diff.nnz(), 0);
    assert_eq!(diff.shape(), (3, 3));
}

/// Adding a number or dividing by a matrix is undefined.
#[test]
fn undefined_operations() {
    let m = small();
    assert!(matches!(
        m.sub_operand(Operand::Scalar(1)),
        Err(SpError::OperationNotDefined { op: "-", .. })
    ));
    assert!(matches!(
        m.div_operand(Operand::Matrix(&m)),
        Err(SpError::OperationNotDefined { op: "/", .. })
    ));
    assert!(matches!(m.div_operand(Operand::Scalar(0)), Err(SpError::ArgumentError(_))));
}

/// Orientation switches are value-preserving and idempotent.
#[test]
fn orientation_round_trip() {
    let m = SparseMatrix::rows(&tall());
    let c = m.to_column_major();
    assert_eq!(c.order(), StorageOrder::ColumnMajor);
    assert_eq!(c.to_column_major().order(), StorageOrder::ColumnMajor);
    let back = c.to_row_major();
    assert_eq!(back.order(), StorageOrder::RowMajor);
    assert_eq!(layout(&back), layout(&m));
    assert_eq!(back.triplets(), m.triplets());
}

/// `build` with a generator.
#[test]
fn build_from_generator() {
    let m = SparseMatrix::build(3, 3, |i, j| if i == j { 1i64 } else { 0 }).unwrap();
    assert_eq!(m, SparseMatrix::identity(3));
}
