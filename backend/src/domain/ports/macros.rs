//! Helper macro generating port error enums with `thiserror` messages and
//! snake-case constructors.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Connection { message: String } => "connection failed: {message}",
//!     }
//! }
//! let err = StoreError::connection("refused");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unavailable => "store unavailable",
            Rejected { reason: String } => "rejected: {reason}",
            Exhausted { limit: u32 } => "exhausted after {limit} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("duplicate");
        assert_eq!(err, SamplePortError::Rejected { reason: "duplicate".to_owned() });
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(
            SamplePortError::exhausted(3_u32).to_string(),
            "exhausted after 3 attempts"
        );
    }
}
