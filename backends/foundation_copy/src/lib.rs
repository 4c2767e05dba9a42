//! Shallow copy, deep copy and move semantics over dynamic plain data.
//!
//! ```
//! use foundation_copy::{deep_copy, shallow_copy, Value};
//!
//! let original = Value::from_json_str(r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
//!
//! let shallow = shallow_copy(&original);
//! shallow.get("b").unwrap().set("c", 99).unwrap();
//! assert_eq!(original.get("b").unwrap().get("c"), Some(Value::from(99)));
//!
//! let deep = deep_copy(&original).unwrap();
//! deep.get("b").unwrap().set("c", 2).unwrap();
//! assert_eq!(original.get("b").unwrap().get("c"), Some(Value::from(99)));
//! ```

pub mod config;
pub mod copier;
pub mod errors;
pub mod path;
pub mod value;

mod json;

pub use config::{CopyConfig, CyclePolicy, UnsupportedPolicy, DEFAULT_MAX_DEPTH};
pub use copier::{assign, deep_copy, move_out, shallow_copy, Copier};
pub use errors::{ConfigError, ConfigResult, CopyError, CopyResult};
pub use path::{PathSegment, ValuePath};
pub use value::{Function, Mapping, Sequence, Value, ValueKind};
