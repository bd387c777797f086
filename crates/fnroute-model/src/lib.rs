mod address;
pub use address::{AddressError, INSTANCE_PORT, INSTANCE_SCHEME, ResolvedAddress};

mod name;
pub use name::{FunctionRef, NAMESPACE_SEPARATOR, parse_function_name};

mod ready;
pub use ready::ReadySet;
