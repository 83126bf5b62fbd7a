//! # Declaration Graph
//!
//! The read-only model of the host's declarations: types, members,
//! parameters and the annotations attached to them, plus the
//! [`DeclarationGraph`] query trait the resolvers are written against.
//!
//! A host embedding the generator implements [`DeclarationGraph`] over its own
//! symbol tables. The CLI uses [`DeclarationSet`], loaded from a YAML or JSON
//! snapshot with [`load_graph`]:
//!
//! ```yaml
//! declarations:
//!   - identity: Sample.Facades.UserServiceFacade
//!     kind: class
//!     namespace: Sample.Facades
//!     interfaces:
//!       - named: Sample.Services.IUserService
//!     annotations:
//!       - kind: Facadegen.HttpFacadeAttribute
//!         args:
//!           - string: User
//!     members:
//!       - kind: method
//!         name: GetUser
//!         type: { named: Sample.Models.User }
//!         parameters:
//!           - { name: id, type: { primitive: int } }
//!         annotations:
//!           - kind: Facadegen.GetAttribute
//!             args:
//!               - string: "{id}"
//! ```

mod descriptor;
mod load;
mod query;
mod types;

pub use descriptor::*;
pub use load::*;
pub use query::*;
pub use types::*;
