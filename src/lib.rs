//! Format-agnostic codecs.
//!
//! A [`Codec`] describes one data shape once and encodes it to, or decodes it
//! from, any format that implements [`Transcoder`]. Two formats ship with the
//! crate: binary NBT ([`NbtTranscoder`], see [`nbt`]) and JSON
//! ([`JsonTranscoder`]).
//!
//! ```
//! use na_codec::{Codec, JsonTranscoder, NbtTranscoder, StructCodec, INT, STRING};
//!
//! #[derive(Debug, PartialEq)]
//! struct Server {
//!     motd: String,
//!     max_players: i32,
//! }
//!
//! let codec = StructCodec::of(
//!     (
//!         STRING.field_of("motd", |s: &Server| &s.motd),
//!         INT.optional_or(20).field_of("max_players", |s: &Server| &s.max_players),
//!     ),
//!     |(motd, max_players)| Server { motd, max_players },
//! )
//! .unwrap();
//!
//! let server = Server { motd: "hi".into(), max_players: 10 };
//! let json = codec.encode(&JsonTranscoder::new(), &server).unwrap();
//! assert_eq!(json, serde_json::json!({ "motd": "hi", "max_players": 10 }));
//!
//! let nbt = codec.encode(&NbtTranscoder, &server).unwrap();
//! assert_eq!(codec.decode(&NbtTranscoder, &nbt).unwrap(), server);
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

pub mod codec;
mod error;
pub mod json;
pub mod nbt;
mod raw;
pub mod structure;
pub mod transcoder;
mod util;

pub use codec::*;
pub use error::*;
pub use json::JsonTranscoder;
pub use nbt::{Compound, NamedTag, NbtTranscoder, Tag, TagID};
pub use raw::*;
pub use structure::*;
pub use transcoder::*;
pub use util::*;
