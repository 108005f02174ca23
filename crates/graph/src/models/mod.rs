//! Typed models for the Graph security surface.
//!
//! Every entity is a [`backed_model!`](m365sec_core::backed_model): its state
//! lives in a backing store, so PATCH bodies carry only what the caller set.
//! Enums are plain serde string enums and reject members they do not know;
//! a stored value that fails to convert reads as `None`.

/// `Display` and `FromStr` through the enum's serde names, so the same
/// spelling is used on the wire and on the command line.
macro_rules! wire_names {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    match ::serde_json::to_value(self) {
                        Ok(::serde_json::Value::String(name)) => f.write_str(&name),
                        _ => write!(f, "{self:?}"),
                    }
                }
            }

            impl ::std::str::FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    ::serde_json::from_value(::serde_json::Value::String(s.to_string()))
                        .map_err(|_| format!("unknown {}: '{s}'", stringify!($ty)))
                }
            }
        )*
    };
}

pub mod alerts;
pub mod attack_simulation;
pub mod common;
pub mod ediscovery;
pub mod hunting;
pub mod labels;
pub mod roots;
pub mod secure_score;
pub mod threat_intelligence;
pub mod triggers;

pub use alerts::*;
pub use attack_simulation::*;
pub use common::*;
pub use ediscovery::*;
pub use hunting::*;
pub use labels::*;
pub use roots::*;
pub use secure_score::*;
pub use threat_intelligence::*;
pub use triggers::*;
