#![warn(missing_docs)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]
// When `docsrs` configuration flag is set enable banner for features in documentation
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Chunkson is a JSON value library with an incremental, chunk-fed parser and
//! a configurable serializer.
//!
//! Its main purpose is reading JSON documents whose bytes arrive in arbitrary
//! fragments, for example from a network socket: input is pushed into the
//! [parser](crate::parser) chunk by chunk, and the parser resumes mid-token
//! across fragment boundaries without retaining references into consumed
//! buffers. The result is a [`JsonValue`](crate::value::JsonValue), a tagged
//! value whose objects and arrays are cheap to share and clone on demand; the
//! [writer](crate::writer) is the parser's inverse and renders a value back
//! to JSON text, optionally pretty printed and key-ordered.
//!
//! The whole library is parameterized over the character width it operates
//! on (8, 16 or 32 bit code units, see [`CodeUnit`]); 8 bit units are the
//! default.
//!
//! # Usage examples
//!
//! ## Parsing
//! See [`JsonPushParser`](crate::parser::JsonPushParser) for chunked input,
//! or the whole-input helper [`parse`](crate::parser::parse):
//!
//! ```
//! use chunkson::parser::{JsonPushParser, ParseStatus};
//!
//! // In this example JSON data is fed in two pieces;
//! // normally they would come from a file or a network connection
//! let mut parser = JsonPushParser::new();
//! assert_eq!(ParseStatus::Pending, parser.process_chunk(br#"{"a": [1, 2"#, false)?);
//! assert_eq!(ParseStatus::Success, parser.process_chunk(br#"3]}"#, true)?);
//!
//! let value = parser.into_value();
//! assert_eq!(Some(23), value["a"][1].integer());
//! # Ok::<(), chunkson::parser::ParseError>(())
//! ```
//!
//! ## Building and writing
//! See the [`value`] module for the value model and the [`writer`] module for
//! the serializer settings:
//!
//! ```
//! use chunkson::value::JsonValue;
//!
//! let mut value = JsonValue::<u8>::new_object();
//! value["name"] = "example".into();
//! value["points"].push(1);
//! value["points"].push(2);
//!
//! assert_eq!(r#"{"name":"example","points":[1,2]}"#, format!("{value}"));
//! ```
//!
//! # Serde integration
//! Optional integration with [Serde](https://docs.rs/serde/latest/serde/)
//! exists to serialize and deserialize a
//! [`JsonValue`](crate::value::JsonValue) with any Serde format. It is
//! enabled with the `serde` feature.

pub mod parser;
pub mod value;
pub mod writer;

mod code_unit;
pub use code_unit::CodeUnit;

#[cfg(feature = "serde")]
mod serde;
