//! The format adapter contract.
//!
//! A [`Transcoder`] knows how to build and inspect the nodes of one concrete
//! format. Codecs are written once against this trait and work with every
//! format that implements it.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

use crate::{Error, Result, ResultExt, cold_path};

mod convert;

pub use convert::convert;

/// The kind of a node as reported by [`Transcoder::kind`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum NodeKind {
    Null,
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    List,
    Compound,
    ByteArray,
    IntArray,
    LongArray,
}

impl NodeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::List => "list",
            Self::Compound => "compound",
            Self::ByteArray => "byte array",
            Self::IntArray => "int array",
            Self::LongArray => "long array",
        }
    }

    /// Returns `true` for the integral kinds `Byte` through `Long`.
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// Returns `true` for integral and floating point kinds.
    pub const fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, Self::Float | Self::Double)
    }

    /// Returns `true` for the sequence kinds: lists and the three arrays.
    pub const fn is_sequence(self) -> bool {
        matches!(
            self,
            Self::List | Self::ByteArray | Self::IntArray | Self::LongArray
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Narrows a double read from a node to `f32`. A finite value that only
/// fits as infinity is out of range; NaN and infinity pass through.
pub(crate) fn narrow_float(value: f64) -> Result<f32> {
    let narrowed = value as f32;
    if value.is_finite() && !narrowed.is_finite() {
        cold_path();
        return Err(Error::out_of_range(value, NodeKind::Float));
    }
    Ok(narrowed)
}

/// Primitive construct and inspect operations over the nodes of one format.
///
/// Implementations are stateless strategy objects: every method is pure, and
/// a transcoder may be shared between threads freely.
///
/// Every `create_x` has a matching `get_x` that returns the original value for
/// a node produced by `create_x`. `get_x` fails with
/// [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch) when the node is
/// of an incompatible kind, and with
/// [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) when a compatible
/// numeric node holds a value that does not fit.
pub trait Transcoder: Send + Sync {
    type Node: Clone + fmt::Debug + Send + Sync;

    /// Classifies a node.
    fn kind(&self, node: &Self::Node) -> NodeKind;

    fn create_null(&self) -> Self::Node;

    fn is_null(&self, node: &Self::Node) -> bool;

    fn create_bool(&self, value: bool) -> Self::Node;

    fn get_bool(&self, node: &Self::Node) -> Result<bool>;

    fn create_byte(&self, value: i8) -> Self::Node;

    fn get_byte(&self, node: &Self::Node) -> Result<i8>;

    fn create_short(&self, value: i16) -> Self::Node;

    fn get_short(&self, node: &Self::Node) -> Result<i16>;

    fn create_int(&self, value: i32) -> Self::Node;

    fn get_int(&self, node: &Self::Node) -> Result<i32>;

    fn create_long(&self, value: i64) -> Self::Node;

    fn get_long(&self, node: &Self::Node) -> Result<i64>;

    fn create_float(&self, value: f32) -> Self::Node;

    fn get_float(&self, node: &Self::Node) -> Result<f32>;

    fn create_double(&self, value: f64) -> Self::Node;

    fn get_double(&self, node: &Self::Node) -> Result<f64>;

    fn create_string(&self, value: &str) -> Self::Node;

    fn get_string<'n>(&self, node: &'n Self::Node) -> Result<Cow<'n, str>>;

    fn create_list(&self, items: Vec<Self::Node>) -> Self::Node;

    /// Returns the elements of a sequence node.
    ///
    /// Formats whose sequences need unwrapping (or whose array kinds are read
    /// as lists) return an owned vector; plain lists are borrowed.
    fn get_list<'n>(&self, node: &'n Self::Node) -> Result<Cow<'n, [Self::Node]>>;

    fn create_compound(&self, entries: Vec<(String, Self::Node)>) -> Self::Node;

    fn get_compound<'n>(&self, node: &'n Self::Node) -> Result<Vec<(&'n str, &'n Self::Node)>>;

    /// Looks up one compound entry.
    ///
    /// Returns `Ok(None)` when the entry is absent and
    /// [`ErrorKind::CompoundExpected`](crate::ErrorKind::CompoundExpected) when
    /// `node` is not a compound.
    fn get_field_opt<'n>(&self, node: &'n Self::Node, name: &str)
    -> Result<Option<&'n Self::Node>>;

    /// Like [`get_field_opt`](Self::get_field_opt), but an absent entry is an
    /// [`ErrorKind::FieldMissing`](crate::ErrorKind::FieldMissing) error.
    #[inline]
    fn get_field<'n>(&self, node: &'n Self::Node, name: &str) -> Result<&'n Self::Node> {
        self.get_field_opt(node, name)?
            .ok_or_else(|| Error::field_missing(name))
    }

    /// Moves the entries out of a compound node.
    fn take_compound(&self, node: Self::Node) -> Result<Vec<(String, Self::Node)>> {
        Ok(self
            .get_compound(&node)?
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.clone()))
            .collect())
    }

    /// Whether the format can hold a node of `kind` at all.
    #[inline]
    fn supports(&self, kind: NodeKind) -> bool {
        let _ = kind;
        true
    }

    /// Whether NaN and infinite floating point values can be represented.
    #[inline]
    fn supports_non_finite(&self) -> bool {
        true
    }

    /// Whether an absent optional field is written as an explicit null rather
    /// than omitted.
    #[inline]
    fn writes_null_for_absent(&self) -> bool {
        false
    }

    fn create_byte_array(&self, values: &[i8]) -> Self::Node {
        self.create_list(values.iter().map(|&v| self.create_byte(v)).collect())
    }

    fn get_byte_array(&self, node: &Self::Node) -> Result<Vec<i8>> {
        self.get_list(node)?
            .iter()
            .enumerate()
            .map(|(i, item)| self.get_byte(item).at_index(i))
            .collect()
    }

    fn create_int_array(&self, values: &[i32]) -> Self::Node {
        self.create_list(values.iter().map(|&v| self.create_int(v)).collect())
    }

    fn get_int_array(&self, node: &Self::Node) -> Result<Vec<i32>> {
        self.get_list(node)?
            .iter()
            .enumerate()
            .map(|(i, item)| self.get_int(item).at_index(i))
            .collect()
    }

    fn create_long_array(&self, values: &[i64]) -> Self::Node {
        self.create_list(values.iter().map(|&v| self.create_long(v)).collect())
    }

    fn get_long_array(&self, node: &Self::Node) -> Result<Vec<i64>> {
        self.get_list(node)?
            .iter()
            .enumerate()
            .map(|(i, item)| self.get_long(item).at_index(i))
            .collect()
    }
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    type Node = T::Node;

    #[inline]
    fn kind(&self, node: &Self::Node) -> NodeKind {
        (**self).kind(node)
    }

    #[inline]
    fn create_null(&self) -> Self::Node {
        (**self).create_null()
    }

    #[inline]
    fn is_null(&self, node: &Self::Node) -> bool {
        (**self).is_null(node)
    }

    #[inline]
    fn create_bool(&self, value: bool) -> Self::Node {
        (**self).create_bool(value)
    }

    #[inline]
    fn get_bool(&self, node: &Self::Node) -> Result<bool> {
        (**self).get_bool(node)
    }

    #[inline]
    fn create_byte(&self, value: i8) -> Self::Node {
        (**self).create_byte(value)
    }

    #[inline]
    fn get_byte(&self, node: &Self::Node) -> Result<i8> {
        (**self).get_byte(node)
    }

    #[inline]
    fn create_short(&self, value: i16) -> Self::Node {
        (**self).create_short(value)
    }

    #[inline]
    fn get_short(&self, node: &Self::Node) -> Result<i16> {
        (**self).get_short(node)
    }

    #[inline]
    fn create_int(&self, value: i32) -> Self::Node {
        (**self).create_int(value)
    }

    #[inline]
    fn get_int(&self, node: &Self::Node) -> Result<i32> {
        (**self).get_int(node)
    }

    #[inline]
    fn create_long(&self, value: i64) -> Self::Node {
        (**self).create_long(value)
    }

    #[inline]
    fn get_long(&self, node: &Self::Node) -> Result<i64> {
        (**self).get_long(node)
    }

    #[inline]
    fn create_float(&self, value: f32) -> Self::Node {
        (**self).create_float(value)
    }

    #[inline]
    fn get_float(&self, node: &Self::Node) -> Result<f32> {
        (**self).get_float(node)
    }

    #[inline]
    fn create_double(&self, value: f64) -> Self::Node {
        (**self).create_double(value)
    }

    #[inline]
    fn get_double(&self, node: &Self::Node) -> Result<f64> {
        (**self).get_double(node)
    }

    #[inline]
    fn create_string(&self, value: &str) -> Self::Node {
        (**self).create_string(value)
    }

    #[inline]
    fn get_string<'n>(&self, node: &'n Self::Node) -> Result<Cow<'n, str>> {
        (**self).get_string(node)
    }

    #[inline]
    fn create_list(&self, items: Vec<Self::Node>) -> Self::Node {
        (**self).create_list(items)
    }

    #[inline]
    fn get_list<'n>(&self, node: &'n Self::Node) -> Result<Cow<'n, [Self::Node]>> {
        (**self).get_list(node)
    }

    #[inline]
    fn create_compound(&self, entries: Vec<(String, Self::Node)>) -> Self::Node {
        (**self).create_compound(entries)
    }

    #[inline]
    fn get_compound<'n>(&self, node: &'n Self::Node) -> Result<Vec<(&'n str, &'n Self::Node)>> {
        (**self).get_compound(node)
    }

    #[inline]
    fn get_field_opt<'n>(
        &self,
        node: &'n Self::Node,
        name: &str,
    ) -> Result<Option<&'n Self::Node>> {
        (**self).get_field_opt(node, name)
    }

    #[inline]
    fn take_compound(&self, node: Self::Node) -> Result<Vec<(String, Self::Node)>> {
        (**self).take_compound(node)
    }

    #[inline]
    fn supports(&self, kind: NodeKind) -> bool {
        (**self).supports(kind)
    }

    #[inline]
    fn supports_non_finite(&self) -> bool {
        (**self).supports_non_finite()
    }

    #[inline]
    fn writes_null_for_absent(&self) -> bool {
        (**self).writes_null_for_absent()
    }

    #[inline]
    fn create_byte_array(&self, values: &[i8]) -> Self::Node {
        (**self).create_byte_array(values)
    }

    #[inline]
    fn get_byte_array(&self, node: &Self::Node) -> Result<Vec<i8>> {
        (**self).get_byte_array(node)
    }

    #[inline]
    fn create_int_array(&self, values: &[i32]) -> Self::Node {
        (**self).create_int_array(values)
    }

    #[inline]
    fn get_int_array(&self, node: &Self::Node) -> Result<Vec<i32>> {
        (**self).get_int_array(node)
    }

    #[inline]
    fn create_long_array(&self, values: &[i64]) -> Self::Node {
        (**self).create_long_array(values)
    }

    #[inline]
    fn get_long_array(&self, node: &Self::Node) -> Result<Vec<i64>> {
        (**self).get_long_array(node)
    }
}

/// Incremental, format-neutral compound construction.
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value.
#[derive(Clone, Debug)]
pub struct CompoundBuilder<N> {
    entries: IndexMap<String, N>,
}

impl<N> Default for CompoundBuilder<N> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<N> CompoundBuilder<N> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts an entry, returning the value it replaced.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, node: N) -> Option<N> {
        self.entries.insert(key.into(), node)
    }

    /// Merges every entry of an existing compound node.
    pub fn merge<T: Transcoder<Node = N>>(&mut self, transcoder: &T, compound: N) -> Result<()> {
        for (key, node) in transcoder.take_compound(compound)? {
            self.entries.insert(key, node);
        }
        Ok(())
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finishes the compound with `transcoder`.
    #[inline]
    pub fn build<T: Transcoder<Node = N>>(self, transcoder: &T) -> N {
        transcoder.create_compound(self.entries.into_iter().collect())
    }
}
