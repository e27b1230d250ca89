#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Maximum nesting of lists and compounds accepted by raw conversion and the
/// binary NBT reader.
pub const MAX_DEPTH: usize = 512;
