#![doc = include_str!("../README.md")]

mod error;
pub use error::{BitFieldError, BitFieldResult};

mod field;
pub use field::BitField;

mod layout;
pub use layout::{DecodedField, Layout, LayoutField};

pub mod types;
pub use types::{BitIndex, UWord, Word, MAX_BIT_INDEX};

pub mod utils;
pub use utils::{parse_word, sign_extend};
