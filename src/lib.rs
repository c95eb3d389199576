pub mod column;
pub mod config;
pub mod data_type;
pub mod error;
pub mod nullable;
pub mod stream;
pub mod tokenizer;
pub mod value;

pub use column::{EnumColumn, EnumTable};
pub use config::{DuplicatePolicy, EnumConfig};
pub use data_type::EnumWidth;
pub use error::{Error, Result};
pub use nullable::NullableEnumColumn;
pub use stream::{Decoder, Encoder};
pub use value::Value;
