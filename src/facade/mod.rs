//! # Facade → Controller pipeline
//!
//! A facade is a class or interface carrying `[HttpFacade]`. Every method on
//! it marked with an HTTP verb annotation becomes one action on a generated
//! controller that forwards to the injected service:
//!
//! ```csharp
//! [HttpFacade("Users")]
//! public partial class UserServiceFacade : IUserService
//! {
//!     [Get("{id}")]
//!     public partial User GetUser(int id);
//!
//!     [Post]
//!     public partial User CreateUser(string name, int? age);
//! }
//! ```
//!
//! becomes `UsersController` with `GetUser([FromRoute] int id)` and
//! `CreateUser([FromBody] CreateUserRequest request)`, plus a sibling
//! `CreateUserRequest` record in the dto namespace.
//!
//! ## Modules
//!
//! - [`resolve`] builds a [`FacadeDescriptor`] from a discovered declaration
//! - [`route`] parses route templates and classifies parameter bindings
//! - [`operation`] builds one [`OperationDescriptor`] per verb-marked method
//! - [`controller`] renders the controller and request-envelope units

mod controller;
mod operation;
mod resolve;
mod route;

pub use controller::*;
pub use operation::*;
pub use resolve::*;
pub use route::*;

use crate::annotation::marker_name;
use std::fmt;

/// HTTP verb selected by a method's marker annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// Verb named by an annotation kind (`Get`, `GetAttribute`, `Facadegen.PostAttribute`, ...).
    pub fn from_kind(kind: &str) -> Option<Self> {
        match marker_name(kind)? {
            "Get" => Some(HttpVerb::Get),
            "Post" => Some(HttpVerb::Post),
            "Put" => Some(HttpVerb::Put),
            "Delete" => Some(HttpVerb::Delete),
            "Patch" => Some(HttpVerb::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
        }
    }

    /// Framework attribute re-stated on the generated action
    pub fn attribute_name(&self) -> &'static str {
        match self {
            HttpVerb::Get => "HttpGet",
            HttpVerb::Post => "HttpPost",
            HttpVerb::Put => "HttpPut",
            HttpVerb::Delete => "HttpDelete",
            HttpVerb::Patch => "HttpPatch",
        }
    }

    pub fn is_get(&self) -> bool {
        *self == HttpVerb::Get
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
