//! Compile-time dependency injection.
//!
//! Services are generic structs over their dependencies and derive [`Build`].
//! A provider (declared with [`provider!`]) owns the leaf values
//! (connections, configuration) and builds everything else on demand. Every
//! built value is cached in the provider, so a service that is requested
//! multiple times is only constructed once and subsequently cloned.

extern crate self as intake_di;

pub use intake_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Returns the cache of values that have already been built.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
