//! Helper macro for the shared shape of driven-port error enums.

/// Define a store error enum with the standard `Connection`/`Query` variants.
///
/// Every driven port distinguishes connectivity failures (the adapter could
/// not reach its backing store) from execution failures (the store rejected
/// the operation). Adapters map their native errors into these variants so
/// services can translate them into domain errors uniformly.
macro_rules! define_store_error {
    ($(#[$meta:meta])* $name:ident, $store:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Store connection could not be established.
            #[error("{} store connection failed: {message}", $store)]
            Connection { message: String },
            /// Query or mutation failed during execution.
            #[error("{} store query failed: {message}", $store)]
            Query { message: String },
        }

        impl $name {
            /// Create a connection error with the given message.
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            /// Create a query error with the given message.
            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }
    };
}

pub(crate) use define_store_error;
