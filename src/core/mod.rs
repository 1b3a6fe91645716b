/// Core functionality modules
///
/// Template rendering, name resolution, sequence execution, and
/// close-match suggestions.

pub mod resolver;
pub mod runner;
pub mod suggest;
pub mod template;

pub use resolver::{Resolution, Resolver};
pub use runner::Runner;
pub use suggest::Suggester;
