pub mod analithics;
pub mod datafiles;
pub mod docs;
pub mod onepage;

pub use analithics::*;
pub use datafiles::*;
pub use docs::*;
pub use onepage::*;
