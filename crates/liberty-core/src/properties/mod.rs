//! Classification of `liberty.*` properties into configuration namespaces
//!
//! Build properties and system/environment properties use a key
//! convention to contribute server configuration without a dedicated
//! file:
//!
//! | Prefix                | Namespace    | Contributes to                   |
//! |-----------------------|--------------|----------------------------------|
//! | `liberty.bootstrap.`  | Bootstrap    | `bootstrap.properties`           |
//! | `liberty.env.`        | Env          | `server.env`                     |
//! | `liberty.jvm.`        | Jvm          | `jvm.options` (value only)       |
//! | `liberty.var.`        | Var          | variable dropin, `value`         |
//! | `liberty.defaultVar.` | DefaultVar   | variable dropin, `defaultValue`  |

mod bag;
mod namespace;

pub use bag::{PropertyBag, PropertySources};
pub use namespace::{ClassifiedProperty, ConfigNamespace, classify};
