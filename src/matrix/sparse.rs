//! Sparse matrix with orientation-tagged hash-of-containers storage.
//!
//! A `SparseMatrix` holds `row_size × column_size` logical entries of which
//! only the non-zero ones are stored, grouped either by row or by column
//! (see [`Storage`]). Operations that depend on orientation match on the
//! storage variant and take the cheap path, regrouping only when they must.
//! Dense traversals always run in logical row-major order.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use faer::Mat;

use crate::config::{SparseOptions, StorageOrder};
use crate::core::coercion::{Operand, Value, coerce_dimension};
use crate::core::container::SparseContainer;
use crate::core::traits::{MatShape, Scalar};
use crate::error::{SpError, SpResult};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::storage::{OuterMap, Storage, merge_outer};
use crate::parallel::RowBackend;
use crate::utils::index::normalize;
use crate::vector::sparse::SparseVector;

#[derive(Clone, Debug)]
pub struct SparseMatrix<T> {
    row_size: usize,
    column_size: usize,
    storage: Storage<T>,
}

impl<T: Scalar> SparseMatrix<T> {
    fn from_storage(storage: Storage<T>, row_size: usize, column_size: usize) -> Self {
        Self {
            row_size,
            column_size,
            storage,
        }
    }

    fn row_major(rows: OuterMap<T>, row_size: usize, column_size: usize) -> Self {
        Self::from_storage(Storage::RowMajor(rows), row_size, column_size)
    }

    // --- construction ---

    /// Matrix whose rows are the given dense rows.
    ///
    /// Rows may be ragged; the column count is the longest row and short
    /// rows are zero-padded.
    pub fn rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let mut column_size = 0;
        let mut outer = OuterMap::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            column_size = column_size.max(row.len());
            let inner = SparseContainer::from_dense(row);
            if !inner.is_empty() {
                outer.insert(i, inner);
            }
        }
        Self::row_major(outer, rows.len(), column_size)
    }

    /// Matrix whose columns are the given dense columns, stored column-major.
    pub fn columns<C: AsRef<[T]>>(columns: &[C]) -> Self {
        Self::rows(columns).transpose()
    }

    /// Take ownership of a nested row map (no copy).
    ///
    /// Without `shape` the dimensions are one past the largest row and
    /// column index present. Zero values and rows left empty are dropped.
    pub fn from_row_map(
        rows: BTreeMap<usize, BTreeMap<usize, T>>,
        shape: Option<(usize, usize)>,
    ) -> SpResult<Self> {
        let mut outer = OuterMap::new();
        let mut needed = (0, 0);
        for (i, row) in rows {
            let inner = SparseContainer::from_map(row);
            if let Some(j) = inner.max_key() {
                needed.0 = needed.0.max(i + 1);
                needed.1 = needed.1.max(j + 1);
                outer.insert(i, inner);
            }
        }
        let (row_size, column_size) = match shape {
            Some((r, c)) if r < needed.0 || c < needed.1 => {
                return Err(SpError::ArgumentError(format!(
                    "entries need at least {}x{}, shape given is {r}x{c}",
                    needed.0, needed.1
                )));
            }
            Some(s) => s,
            None => needed,
        };
        Ok(Self::row_major(outer, row_size, column_size))
    }

    /// Copy a nested row map.
    pub fn from_row_map_ref(
        rows: &BTreeMap<usize, BTreeMap<usize, T>>,
        shape: Option<(usize, usize)>,
    ) -> SpResult<Self> {
        Self::from_row_map(rows.clone(), shape)
    }

    /// `rows × columns` matrix filled by `f(i, j)`; zero results are not stored.
    pub fn build<R, C, F>(rows: R, columns: C, mut f: F) -> SpResult<Self>
    where
        R: TryInto<usize> + Copy + fmt::Display,
        C: TryInto<usize> + Copy + fmt::Display,
        F: FnMut(usize, usize) -> T,
    {
        let row_size = coerce_dimension(rows, "row size")?;
        let column_size = coerce_dimension(columns, "column size")?;
        let mut outer = OuterMap::new();
        for i in 0..row_size {
            let inner: SparseContainer<T> = (0..column_size).map(|j| (j, f(i, j))).collect();
            if !inner.is_empty() {
                outer.insert(i, inner);
            }
        }
        Ok(Self::row_major(outer, row_size, column_size))
    }

    /// `n × n` matrix filled by `f(i, j)`; `build` with equal dimensions.
    pub fn build_square<N, F>(n: N, f: F) -> SpResult<Self>
    where
        N: TryInto<usize> + Copy + fmt::Display,
        F: FnMut(usize, usize) -> T,
    {
        Self::build(n, n, f)
    }

    /// Square matrix with `values` on the diagonal.
    pub fn diagonal(values: &[T]) -> Self {
        let n = values.len();
        let mut outer = OuterMap::new();
        for (i, &v) in values.iter().enumerate() {
            if !v.is_zero() {
                outer.insert(i, std::iter::once((i, v)).collect::<SparseContainer<T>>());
            }
        }
        Self::row_major(outer, n, n)
    }

    /// `n × n` diagonal matrix with every diagonal entry equal to `value`.
    pub fn scalar(n: usize, value: T) -> Self {
        Self::diagonal(&vec![value; n])
    }

    pub fn identity(n: usize) -> Self {
        Self::scalar(n, T::one())
    }

    /// Alias of `identity`.
    pub fn unit(n: usize) -> Self {
        Self::identity(n)
    }

    /// `n × n` matrix with nothing stored.
    pub fn zero(n: usize) -> Self {
        Self::row_major(OuterMap::new(), n, n)
    }

    /// Single-row matrix.
    pub fn row_vector(row: &[T]) -> Self {
        Self::row_vector_from(&SparseVector::from_dense(row))
    }

    pub fn row_vector_from(row: &SparseVector<T>) -> Self {
        let mut outer = OuterMap::new();
        if row.nnz() > 0 {
            outer.insert(0, row.container().clone());
        }
        Self::row_major(outer, 1, row.size())
    }

    /// Single-column matrix.
    pub fn column_vector(column: &[T]) -> Self {
        Self::column_vector_from(&SparseVector::from_dense(column))
    }

    pub fn column_vector_from(column: &SparseVector<T>) -> Self {
        let outer: OuterMap<T> = column
            .iter_nonzero()
            .map(|(i, v)| (i, std::iter::once((0, v)).collect::<SparseContainer<T>>()))
            .collect();
        Self::row_major(outer, column.size(), 1)
    }

    /// Matrix with no rows or no columns.
    pub fn empty<R, C>(rows: R, columns: C) -> SpResult<Self>
    where
        R: TryInto<usize> + Copy + fmt::Display,
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let row_size = coerce_dimension(rows, "row size")?;
        let column_size = coerce_dimension(columns, "column size")?;
        if row_size != 0 && column_size != 0 {
            return Err(SpError::ArgumentError("one size must be 0".into()));
        }
        Ok(Self::row_major(OuterMap::new(), row_size, column_size))
    }

    /// Sparse copy of any dense matrix.
    pub fn from_dense_matrix<D: DenseMatrix<T>>(dense: &D) -> Self {
        let (nrows, ncols) = (dense.nrows(), dense.ncols());
        let mut outer = OuterMap::new();
        for i in 0..nrows {
            let inner: SparseContainer<T> = (0..ncols).map(|j| (j, dense.at(i, j))).collect();
            if !inner.is_empty() {
                outer.insert(i, inner);
            }
        }
        Self::row_major(outer, nrows, ncols)
    }

    pub fn from_dense(rows: &[Vec<T>]) -> Self {
        Self::rows(rows)
    }

    pub fn from_faer(dense: &Mat<T>) -> Self {
        Self::from_dense_matrix(dense)
    }

    // --- shape and access ---

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn column_size(&self) -> usize {
        self.column_size
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_size, self.column_size)
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.storage.nnz()
    }

    /// Current physical orientation.
    pub fn order(&self) -> StorageOrder {
        self.storage.order()
    }

    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_size == 0 || self.column_size == 0
    }

    pub fn is_square(&self) -> bool {
        self.row_size == self.column_size
    }

    /// Entry `(i, j)`; negative indices count from the end.
    pub fn element(&self, i: isize, j: isize) -> SpResult<T> {
        let i = normalize(i, self.row_size)?;
        let j = normalize(j, self.column_size)?;
        Ok(self.storage.get(i, j))
    }

    /// Inner container for `outer` when `outer` matches the storage
    /// orientation, otherwise the entries gathered across every container.
    fn line(&self, index: usize, as_row: bool) -> Cow<'_, SparseContainer<T>> {
        let native = matches!(
            (&self.storage, as_row),
            (Storage::RowMajor(_), true) | (Storage::ColumnMajor(_), false)
        );
        let outer = self.storage.outer();
        if native {
            match outer.get(&index) {
                Some(c) => Cow::Borrowed(c),
                None => Cow::Owned(SparseContainer::new()),
            }
        } else {
            Cow::Owned(outer.iter().map(|(&k, c)| (k, c.get(index))).collect())
        }
    }

    /// Snapshot of row `i`.
    pub fn row(&self, i: isize) -> SpResult<SparseVector<T>> {
        let i = normalize(i, self.row_size)?;
        let line = self.line(i, true).into_owned();
        Ok(SparseVector::from_parts(self.column_size, line))
    }

    /// Snapshot of row `i`; identical to `row`, the vector is sparse either way.
    pub fn row_nonzero(&self, i: isize) -> SpResult<SparseVector<T>> {
        self.row(i)
    }

    /// Snapshot of column `j`.
    pub fn column(&self, j: isize) -> SpResult<SparseVector<T>> {
        let j = normalize(j, self.column_size)?;
        let line = self.line(j, false).into_owned();
        Ok(SparseVector::from_parts(self.row_size, line))
    }

    pub fn column_nonzero(&self, j: isize) -> SpResult<SparseVector<T>> {
        self.column(j)
    }

    /// Visit every value of row `i`, zeros included.
    pub fn row_each<F: FnMut(T)>(&self, i: isize, mut f: F) -> SpResult<()> {
        let i = normalize(i, self.row_size)?;
        let line = self.line(i, true);
        (0..self.column_size).for_each(|j| f(line.get(j)));
        Ok(())
    }

    /// Visit the stored values of row `i` in ascending column order.
    pub fn row_each_nonzero<F: FnMut(T)>(&self, i: isize, mut f: F) -> SpResult<()> {
        let i = normalize(i, self.row_size)?;
        self.line(i, true).values().for_each(&mut f);
        Ok(())
    }

    /// Visit every value of column `j`, zeros included.
    pub fn column_each<F: FnMut(T)>(&self, j: isize, mut f: F) -> SpResult<()> {
        let j = normalize(j, self.column_size)?;
        let line = self.line(j, false);
        (0..self.row_size).for_each(|i| f(line.get(i)));
        Ok(())
    }

    /// Visit the stored values of column `j` in ascending row order.
    pub fn column_each_nonzero<F: FnMut(T)>(&self, j: isize, mut f: F) -> SpResult<()> {
        let j = normalize(j, self.column_size)?;
        self.line(j, false).values().for_each(&mut f);
        Ok(())
    }

    // --- orientation ---

    /// Same matrix stored row-major.
    pub fn to_row_major(&self) -> Self {
        self.clone().into_order(StorageOrder::RowMajor)
    }

    /// Same matrix stored column-major.
    pub fn to_column_major(&self) -> Self {
        self.clone().into_order(StorageOrder::ColumnMajor)
    }

    /// Regroup storage into `order`; a no-op when already there.
    pub fn into_order(self, order: StorageOrder) -> Self {
        let Self {
            row_size,
            column_size,
            storage,
        } = self;
        Self::from_storage(storage.into_order(order), row_size, column_size)
    }

    /// Mathematical transpose: dimensions swap and the stored key structure
    /// is relabelled under the other orientation.
    pub fn transpose(&self) -> Self {
        Self::from_storage(self.storage.clone().relabel(), self.column_size, self.row_size)
    }

    // --- traversal ---

    /// Stored entries as `(row, column, value)` in row-major order.
    pub fn triplets(&self) -> Vec<(usize, usize, T)> {
        self.storage
            .row_major_outer()
            .iter()
            .flat_map(|(&i, row)| row.iter().map(move |(j, v)| (i, j, v)))
            .collect()
    }

    /// `f` at every logical position, keeping non-zero results. Costs
    /// `row_size × column_size` calls regardless of sparsity.
    pub fn collect<F: FnMut(T) -> T>(&self, mut f: F) -> Self {
        let rows = self.storage.row_major_outer();
        let empty = SparseContainer::new();
        let mut outer = OuterMap::new();
        for i in 0..self.row_size {
            let row = rows.get(&i).unwrap_or(&empty);
            let mapped: SparseContainer<T> = (0..self.column_size).map(|j| (j, f(row.get(j)))).collect();
            if !mapped.is_empty() {
                outer.insert(i, mapped);
            }
        }
        Self::row_major(outer, self.row_size, self.column_size)
    }

    /// `f` at stored positions only, keeping non-zero results.
    pub fn collect_nonzero<F: FnMut(T) -> T>(&self, mut f: F) -> Self {
        let outer: OuterMap<T> = self
            .storage
            .outer()
            .iter()
            .map(|(&k, inner)| (k, inner.map_nonzero(&mut f)))
            .filter(|(_, inner)| !inner.is_empty())
            .collect();
        Self::from_storage(
            Storage::with_order(self.order(), outer),
            self.row_size,
            self.column_size,
        )
    }

    pub fn each<F: FnMut(T)>(&self, mut f: F) {
        self.each_with_index(|_, _, v| f(v));
    }

    pub fn each_nonzero<F: FnMut(T)>(&self, mut f: F) {
        self.each_with_index_nonzero(|_, _, v| f(v));
    }

    /// `f(i, j, value)` over every logical position in row-major order.
    pub fn each_with_index<F: FnMut(usize, usize, T)>(&self, mut f: F) {
        let rows = self.storage.row_major_outer();
        let empty = SparseContainer::new();
        for i in 0..self.row_size {
            let row = rows.get(&i).unwrap_or(&empty);
            for j in 0..self.column_size {
                f(i, j, row.get(j));
            }
        }
    }

    /// `f(i, j, value)` over stored entries in row-major order.
    pub fn each_with_index_nonzero<F: FnMut(usize, usize, T)>(&self, mut f: F) {
        for (i, row) in self.storage.row_major_outer().iter() {
            for (j, v) in row.iter() {
                f(*i, j, v);
            }
        }
    }

    // --- arithmetic ---

    /// Multiply every stored entry by `x`; orientation is kept.
    pub fn scale(&self, x: T) -> Self {
        self.collect_nonzero(|v| v * x)
    }

    /// Divide every stored entry by `x`; a zero divisor is rejected.
    pub fn try_div(&self, x: T) -> SpResult<Self> {
        if x.is_zero() {
            return Err(SpError::ArgumentError("division of a matrix by zero".into()));
        }
        Ok(self.collect_nonzero(|v| v / x))
    }

    /// Sparse product `self * rhs`, stored row-major.
    pub fn matmul(&self, rhs: &SparseMatrix<T>) -> SpResult<Self> {
        self.matmul_with(rhs, &SparseOptions::default())
    }

    /// Sparse product with explicit options.
    ///
    /// Each stored row of `self` is combined with the rows of `rhs` named by
    /// its column indices, so the cost follows nnz(self) times the average
    /// fill of `rhs` rows rather than the dense cube.
    pub fn matmul_with(&self, rhs: &SparseMatrix<T>, opts: &SparseOptions) -> SpResult<Self> {
        if self.column_size != rhs.row_size {
            return Err(SpError::dimensions("matrix product", self.shape(), rhs.shape()));
        }
        let lhs_rows = self.storage.row_major_outer();
        let rhs_rows = rhs.storage.row_major_outer();
        let backend = RowBackend::select(lhs_rows.len(), opts)?;
        log::trace!(
            "sparse product {}x{} (nnz {}) * {}x{} (nnz {}) on {} worker(s)",
            self.row_size,
            self.column_size,
            self.nnz(),
            rhs.row_size,
            rhs.column_size,
            rhs.nnz(),
            backend.workers()
        );
        let rhs_rows: &OuterMap<T> = &rhs_rows;
        let product = backend.map_rows(&lhs_rows, |row| {
            let mut acc = SparseContainer::new();
            for (k, v) in row.iter() {
                if let Some(rhs_row) = rhs_rows.get(&k) {
                    for (j, w) in rhs_row.iter() {
                        acc.accumulate(j, v * w);
                    }
                }
            }
            acc
        });
        let out = Self::row_major(product, self.row_size, rhs.column_size);
        Ok(out.into_order(opts.order))
    }

    /// Element-wise `f(a, b)` over the union of stored positions, in the
    /// orientation of `self`.
    pub(crate) fn merge_with<F>(&self, rhs: &SparseMatrix<T>, f: F) -> SpResult<Self>
    where
        F: FnMut(T, T) -> T,
    {
        if self.shape() != rhs.shape() {
            return Err(SpError::dimensions("element-wise", self.shape(), rhs.shape()));
        }
        let rhs_outer: Cow<'_, OuterMap<T>> = if rhs.order() == self.order() {
            Cow::Borrowed(rhs.storage.outer())
        } else {
            Cow::Owned(rhs.storage.regroup().into_outer())
        };
        let merged = merge_outer(self.storage.outer(), &rhs_outer, f);
        Ok(Self::from_storage(
            Storage::with_order(self.order(), merged),
            self.row_size,
            self.column_size,
        ))
    }

    pub fn try_add(&self, rhs: &SparseMatrix<T>) -> SpResult<Self> {
        self.merge_with(rhs, |a, b| a + b)
    }

    pub fn try_sub(&self, rhs: &SparseMatrix<T>) -> SpResult<Self> {
        self.merge_with(rhs, |a, b| a - b)
    }

    /// `self * rhs` for any operand; vectors multiply as single columns.
    pub fn mul_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        match rhs {
            Operand::Scalar(x) => Ok(Value::Matrix(self.scale(x))),
            _ => {
                let m = rhs.to_sparse_matrix()?;
                Ok(Value::Matrix(self.matmul(&m)?))
            }
        }
    }

    pub fn add_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        if rhs.is_scalar() {
            return Err(SpError::undefined("+", "SparseMatrix", "Scalar"));
        }
        let m = rhs.to_sparse_matrix()?;
        Ok(Value::Matrix(self.try_add(&m)?))
    }

    pub fn sub_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        if rhs.is_scalar() {
            return Err(SpError::undefined("-", "SparseMatrix", "Scalar"));
        }
        let m = rhs.to_sparse_matrix()?;
        Ok(Value::Matrix(self.try_sub(&m)?))
    }

    /// Division is only defined by a number.
    pub fn div_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        match rhs {
            Operand::Scalar(x) => Ok(Value::Matrix(self.try_div(x)?)),
            other => Err(SpError::undefined("/", "SparseMatrix", other.kind())),
        }
    }

    // --- conversion ---

    /// Materialize into any dense matrix type.
    pub fn to_dense_as<D: DenseMatrix<T>>(&self) -> D {
        let rows = self.storage.row_major_outer();
        let empty = SparseContainer::new();
        D::from_fn_dense(self.row_size, self.column_size, |i, j| {
            rows.get(&i).unwrap_or(&empty).get(j)
        })
    }

    /// Dense nested row lists.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        self.to_dense_as()
    }

    pub fn to_faer(&self) -> Mat<T> {
        self.to_dense_as()
    }
}

impl<T: Scalar> MatShape for SparseMatrix<T> {
    fn nrows(&self) -> usize {
        self.row_size
    }
    fn ncols(&self) -> usize {
        self.column_size
    }
}

/// Equal dimensions and equal stored entries, whatever the orientation of
/// either side.
impl<T: PartialEq> PartialEq for SparseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.row_size != other.row_size || self.column_size != other.column_size {
            return false;
        }
        let (a, b) = (&self.storage, &other.storage);
        match (a, b) {
            (Storage::RowMajor(x), Storage::RowMajor(y))
            | (Storage::ColumnMajor(x), Storage::ColumnMajor(y)) => x == y,
            (Storage::RowMajor(x), Storage::ColumnMajor(y))
            | (Storage::ColumnMajor(x), Storage::RowMajor(y)) => {
                let count = |m: &OuterMap<T>| m.values().map(SparseContainer::len).sum::<usize>();
                count(x) == count(y)
                    && x.iter().all(|(k1, inner)| {
                        inner.as_map().iter().all(|(k2, v)| {
                            y.get(k2).and_then(|c| c.as_map().get(k1)) == Some(v)
                        })
                    })
            }
        }
    }
}

impl<T: Eq> Eq for SparseMatrix<T> {}

impl<T: Scalar + Hash> Hash for SparseMatrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row_size.hash(state);
        self.column_size.hash(state);
        self.storage.row_major_outer().hash(state);
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "SparseMatrix.empty({}, {})", self.row_size, self.column_size);
        }
        write!(f, "SparseMatrix[")?;
        for (i, row) in self.to_dense().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl<T: Scalar> Mul<T> for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    fn mul(self, rhs: T) -> SparseMatrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    fn mul(self, rhs: T) -> SparseMatrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<&SparseMatrix<T>> for &SparseMatrix<T> {
    type Output = SpResult<SparseMatrix<T>>;

    fn mul(self, rhs: &SparseMatrix<T>) -> Self::Output {
        self.matmul(rhs)
    }
}

impl<T: Scalar> Add<&SparseMatrix<T>> for &SparseMatrix<T> {
    type Output = SpResult<SparseMatrix<T>>;

    fn add(self, rhs: &SparseMatrix<T>) -> Self::Output {
        self.try_add(rhs)
    }
}

impl<T: Scalar> Sub<&SparseMatrix<T>> for &SparseMatrix<T> {
    type Output = SpResult<SparseMatrix<T>>;

    fn sub(self, rhs: &SparseMatrix<T>) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    fn neg(self) -> SparseMatrix<T> {
        self.collect_nonzero(|v| -v)
    }
}

/// `SparseMatrix[[a, b], [c, d], ...]` from dense rows.
#[macro_export]
macro_rules! sparse_matrix {
    ($([$($x:expr),* $(,)?]),+ $(,)?) => {
        $crate::matrix::sparse::SparseMatrix::rows(&[$(vec![$($x),*]),+])
    };
}
