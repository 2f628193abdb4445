//! Sparse vector: a logical length plus a zero-eliding container.
//!
//! `SparseVector` stores only its non-zero entries. Traversals come in two
//! flavours: dense ones (`each`, `merge_each`, `map_pairwise`) that visit
//! every logical index and materialize zeros, and sparse ones (`each_nonzero`,
//! `merge_each_nonzero`, `map_pairwise_nonzero`) that only visit stored keys.
//! Addition, subtraction and the inner product use the sparse merge.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use faer::Col;
use num_traits::Float;

use crate::core::coercion::{Operand, Value};
use crate::core::container::SparseContainer;
use crate::core::traits::{Scalar, VectorLike};
use crate::error::{SpError, SpResult};
use crate::matrix::sparse::SparseMatrix;
use crate::utils::index::normalize;
use crate::utils::merge::{Side, merge_keys};

#[derive(Clone, Debug)]
pub struct SparseVector<T> {
    size: usize,
    elements: SparseContainer<T>,
}

impl<T: Scalar> SparseVector<T> {
    /// Sparse copy of a dense slice; zeros are dropped.
    pub fn from_dense(values: &[T]) -> Self {
        Self {
            size: values.len(),
            elements: SparseContainer::from_dense(values),
        }
    }

    /// All-zero vector of length `size`.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            elements: SparseContainer::new(),
        }
    }

    /// Build from an owned container.
    ///
    /// Without an explicit `size` the length is one past the largest stored
    /// index (zero for an empty container). An explicit `size` must cover
    /// every stored index.
    pub fn from_container(elements: SparseContainer<T>, size: Option<usize>) -> SpResult<Self> {
        let needed = elements.max_key().map_or(0, |k| k + 1);
        let size = match size {
            Some(s) if s < needed => {
                return Err(SpError::ArgumentError(format!(
                    "index {} does not fit in a vector of size {s}",
                    needed - 1
                )));
            }
            Some(s) => s,
            None => needed,
        };
        Ok(Self { size, elements })
    }

    /// Take ownership of a sparse map (no copy).
    pub fn from_map(map: BTreeMap<usize, T>, size: Option<usize>) -> SpResult<Self> {
        Self::from_container(SparseContainer::from_map(map), size)
    }

    /// Copy a sparse map.
    pub fn from_map_ref(map: &BTreeMap<usize, T>, size: Option<usize>) -> SpResult<Self> {
        Self::from_map(map.clone(), size)
    }

    pub(crate) fn from_parts(size: usize, elements: SparseContainer<T>) -> Self {
        debug_assert!(elements.max_key().is_none_or(|k| k < size));
        Self { size, elements }
    }

    /// Logical length, zeros included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.elements.len()
    }

    pub fn nonzero_count(&self) -> usize {
        self.nnz()
    }

    /// Stored indices in ascending order.
    pub fn sorted_keys(&self) -> Vec<usize> {
        self.elements.nonzero_keys().collect()
    }

    /// Read-only view of the stored entries.
    pub fn container(&self) -> &SparseContainer<T> {
        &self.elements
    }

    /// Element `i`; negative `i` counts from the end.
    pub fn element(&self, i: isize) -> SpResult<T> {
        let i = normalize(i, self.size)?;
        Ok(self.elements.get(i))
    }

    /// Every logical value in index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.size).map(move |i| self.elements.get(i))
    }

    /// Stored `(index, value)` pairs in ascending index order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.elements.iter()
    }

    pub fn each<F: FnMut(T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn each_nonzero<F: FnMut(T)>(&self, mut f: F) {
        self.elements.values().for_each(&mut f);
    }

    fn check_size(&self, other_size: usize) -> SpResult<()> {
        if self.size != other_size {
            return Err(SpError::sizes("vector", self.size, other_size));
        }
        Ok(())
    }

    /// Visit `(self[i], other[i])` for every `i` in `0..size`.
    pub fn merge_each<V, F>(&self, other: &V, mut f: F) -> SpResult<()>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(T, T),
    {
        self.check_size(other.size())?;
        for i in 0..self.size {
            f(self.elements.get(i), other.value(i));
        }
        Ok(())
    }

    /// Visit `(self[i], other[i])` for the ascending union of both
    /// operands' stored indices.
    pub fn merge_each_nonzero<V, F>(&self, other: &V, mut f: F) -> SpResult<()>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(T, T),
    {
        self.merge_nonzero_indexed(other, |_, a, b| f(a, b))
    }

    /// `merge_each` against a dynamically typed operand.
    pub fn merge_each_operand<F>(&self, other: Operand<'_, T>, f: F) -> SpResult<()>
    where
        F: FnMut(T, T),
    {
        self.merge_each(other.as_vector_like()?, f)
    }

    /// `merge_each_nonzero` against a dynamically typed operand.
    pub fn merge_each_nonzero_operand<F>(&self, other: Operand<'_, T>, f: F) -> SpResult<()>
    where
        F: FnMut(T, T),
    {
        self.merge_each_nonzero(other.as_vector_like()?, f)
    }

    fn merge_nonzero_indexed<V, F>(&self, other: &V, mut f: F) -> SpResult<()>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(usize, T, T),
    {
        self.check_size(other.size())?;
        for (i, side) in merge_keys(self.elements.nonzero_keys(), other.nonzero_keys()) {
            let (a, b) = match side {
                Side::Left => (self.elements.get(i), T::zero()),
                Side::Right => (T::zero(), other.value(i)),
                Side::Both => (self.elements.get(i), other.value(i)),
            };
            f(i, a, b);
        }
        Ok(())
    }

    /// Apply `f` to each non-zero value; zeros are not visited and zero
    /// results are dropped.
    pub fn map<F: FnMut(T) -> T>(&self, f: F) -> Self {
        Self::from_parts(self.size, self.elements.map_nonzero(f))
    }

    /// Dense pairwise map into a new vector.
    pub fn map_pairwise<V, F>(&self, other: &V, f: F) -> SpResult<Self>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(T, T) -> T,
    {
        let dense = self.collect_pairwise(other, f)?;
        Ok(Self::from_dense(&dense))
    }

    /// Dense pairwise map into a plain sequence of `size` results.
    pub fn collect_pairwise<V, F>(&self, other: &V, mut f: F) -> SpResult<Vec<T>>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(T, T) -> T,
    {
        let mut out = Vec::with_capacity(self.size);
        self.merge_each(other, |a, b| out.push(f(a, b)))?;
        Ok(out)
    }

    /// Pairwise map over the union of stored indices only.
    pub fn map_pairwise_nonzero<V, F>(&self, other: &V, mut f: F) -> SpResult<Self>
    where
        V: VectorLike<T> + ?Sized,
        F: FnMut(T, T) -> T,
    {
        let mut elements = SparseContainer::new();
        self.merge_nonzero_indexed(other, |i, a, b| elements.set(i, f(a, b)))?;
        Ok(Self::from_parts(self.size, elements))
    }

    /// Multiply every entry by `x`.
    pub fn scale(&self, x: T) -> Self {
        self.map(|v| v * x)
    }

    /// Divide every entry by `x`; a zero divisor is rejected.
    pub fn try_div(&self, x: T) -> SpResult<Self> {
        if x.is_zero() {
            return Err(SpError::ArgumentError("division of a vector by zero".into()));
        }
        Ok(self.map(|v| v / x))
    }

    pub fn try_add<V: VectorLike<T> + ?Sized>(&self, other: &V) -> SpResult<Self> {
        self.map_pairwise_nonzero(other, |a, b| a + b)
    }

    pub fn try_sub<V: VectorLike<T> + ?Sized>(&self, other: &V) -> SpResult<Self> {
        self.map_pairwise_nonzero(other, |a, b| a - b)
    }

    /// Sum of `a * b` over indices stored in both operands.
    pub fn inner_product<V: VectorLike<T> + ?Sized>(&self, other: &V) -> SpResult<T> {
        self.check_size(other.size())?;
        let mut p = T::zero();
        for (i, side) in merge_keys(self.elements.nonzero_keys(), other.nonzero_keys()) {
            if side == Side::Both {
                p = p + self.elements.get(i) * other.value(i);
            }
        }
        Ok(p)
    }

    /// Copy with a new logical length; entries past it are dropped.
    pub fn resized(&self, size: usize) -> Self {
        let mut elements = self.elements.clone();
        elements.truncate(size);
        Self::from_parts(size, elements)
    }

    /// Single-row matrix holding this vector.
    pub fn covector(&self) -> SparseMatrix<T> {
        SparseMatrix::row_vector_from(self)
    }

    /// Single-column matrix holding this vector.
    pub fn to_column_matrix(&self) -> SparseMatrix<T> {
        SparseMatrix::column_vector_from(self)
    }

    pub fn to_dense(&self) -> Vec<T> {
        self.elements.to_dense(self.size)
    }

    pub fn to_faer(&self) -> Col<T> {
        Col::from_fn(self.size, |i| self.elements.get(i))
    }

    pub fn from_faer(col: &Col<T>) -> Self {
        Self {
            size: col.nrows(),
            elements: (0..col.nrows()).map(|i| (i, col[i])).collect(),
        }
    }

    /// `self * rhs`: scalar scales, a matrix operand multiplies this vector
    /// taken as a column, another vector is undefined.
    pub fn mul_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        match rhs {
            Operand::Scalar(x) => Ok(Value::Vector(self.scale(x))),
            Operand::Matrix(_) | Operand::DenseMatrix(_) => {
                let m = rhs.to_sparse_matrix()?;
                Ok(Value::Matrix(self.to_column_matrix().matmul(&m)?))
            }
            Operand::Vector(_) | Operand::DenseVector(_) => {
                Err(SpError::undefined("*", "SparseVector", rhs.kind()))
            }
        }
    }

    pub fn add_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        self.additive_operand(rhs, "+", |a, b| a + b)
    }

    pub fn sub_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        self.additive_operand(rhs, "-", |a, b| a - b)
    }

    fn additive_operand<F>(&self, rhs: Operand<'_, T>, op: &'static str, f: F) -> SpResult<Value<T>>
    where
        F: Fn(T, T) -> T,
    {
        match rhs {
            Operand::Vector(_) | Operand::DenseVector(_) => {
                let v = rhs.as_vector_like()?;
                Ok(Value::Vector(self.map_pairwise_nonzero(v, f)?))
            }
            Operand::Matrix(_) | Operand::DenseMatrix(_) => {
                let m = rhs.to_sparse_matrix()?;
                let lhs = self.to_column_matrix();
                Ok(Value::Matrix(lhs.merge_with(&m, f)?))
            }
            Operand::Scalar(_) => Err(SpError::undefined(op, "SparseVector", "Scalar")),
        }
    }

    pub fn div_operand(&self, rhs: Operand<'_, T>) -> SpResult<Value<T>> {
        match rhs {
            Operand::Scalar(x) => Ok(Value::Vector(self.try_div(x)?)),
            other => Err(SpError::undefined("/", "SparseVector", other.kind())),
        }
    }
}

impl<T: Scalar + Float> SparseVector<T> {
    /// Euclidean norm over the stored values.
    pub fn norm(&self) -> T {
        self.elements
            .values()
            .fold(T::zero(), |acc, v| acc + v * v)
            .sqrt()
    }

    /// Alias of `norm`.
    pub fn r(&self) -> T {
        self.norm()
    }
}

impl<T: Scalar> VectorLike<T> for SparseVector<T> {
    fn size(&self) -> usize {
        self.size
    }
    fn value(&self, i: usize) -> T {
        self.elements.get(i)
    }
    fn nonzero_keys(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.elements.nonzero_keys())
    }
}

impl<T: PartialEq> PartialEq for SparseVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.elements == other.elements
    }
}

impl<T: Eq> Eq for SparseVector<T> {}

impl<T: Hash> Hash for SparseVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.elements.hash(state);
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for SparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SparseVector[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl<T: Scalar> Mul<T> for &SparseVector<T> {
    type Output = SparseVector<T>;

    fn mul(self, rhs: T) -> SparseVector<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for SparseVector<T> {
    type Output = SparseVector<T>;

    fn mul(self, rhs: T) -> SparseVector<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &SparseVector<T> {
    type Output = SparseVector<T>;

    fn neg(self) -> SparseVector<T> {
        self.map(|v| -v)
    }
}

impl<T: Scalar> Add<&SparseVector<T>> for &SparseVector<T> {
    type Output = SpResult<SparseVector<T>>;

    fn add(self, rhs: &SparseVector<T>) -> Self::Output {
        self.try_add(rhs)
    }
}

impl<T: Scalar> Sub<&SparseVector<T>> for &SparseVector<T> {
    type Output = SpResult<SparseVector<T>>;

    fn sub(self, rhs: &SparseVector<T>) -> Self::Output {
        self.try_sub(rhs)
    }
}

/// `SparseVector[a, b, ...]` from dense values.
#[macro_export]
macro_rules! sparse_vector {
    ($($x:expr),* $(,)?) => {
        $crate::vector::sparse::SparseVector::from_dense(&[$($x),*])
    };
}
