#![allow(dead_code)]

//! Shared graph builders for integration tests.
//!
//! `sample_graph` models a small user service: a `UserServiceFacade` over
//! `IUserService`, a `User` entity with an `Address`, and two dtos
//! (`UserInfo` with a hand-written `Address`, `AddressDto` in generic form).

use facadegen::graph::{
    Annotation, AnnotationValue, Declaration, DeclarationSet, Member, TypeDescriptor,
};

pub const MODELS: &str = "Sample.Models";
pub const FACADES: &str = "Sample.Facades";
pub const SERVICES: &str = "Sample.Services";

pub fn string(value: &str) -> AnnotationValue {
    AnnotationValue::String(value.to_string())
}

pub fn int() -> TypeDescriptor {
    TypeDescriptor::primitive("int")
}

pub fn task_of(inner: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::container("System.Threading.Tasks.Task", vec![inner])
}

pub fn user() -> TypeDescriptor {
    TypeDescriptor::named("Sample.Models.User")
}

pub fn verb(kind: &str, route: Option<&str>) -> Annotation {
    let annotation = Annotation::new(format!("Facadegen.{kind}Attribute"));
    match route {
        Some(route) => annotation.with_arg(string(route)),
        None => annotation,
    }
}

pub fn user_entity() -> Declaration {
    Declaration::class("Sample.Models.User", MODELS)
        .with_member(Member::property("Id", int()))
        .with_member(
            Member::property("Name", TypeDescriptor::primitive("string"))
                .with_initializer("string.Empty")
                .with_annotation(
                    Annotation::new("System.ComponentModel.DataAnnotations.MaxLengthAttribute")
                        .with_arg(AnnotationValue::Primitive("100".into())),
                )
                .with_annotation(
                    Annotation::new("System.ComponentModel.DataAnnotations.MinLengthAttribute")
                        .with_arg(AnnotationValue::Primitive("5".into())),
                )
                .with_annotation(Annotation::new(
                    "System.Runtime.CompilerServices.RequiredMemberAttribute",
                )),
        )
        .with_member(
            Member::property("Age", int()).with_annotation(
                Annotation::new("System.ComponentModel.DataAnnotations.RangeAttribute")
                    .with_arg(AnnotationValue::Primitive("0".into()))
                    .with_arg(AnnotationValue::Primitive("60".into()))
                    .with_named("ErrorMessage", string("Wrong Age")),
            ),
        )
        .with_member(Member::property(
            "Address",
            TypeDescriptor::named("Sample.Models.Address").nullable(),
        ))
        .with_member(Member::property(
            "LastLoginAt",
            TypeDescriptor::named("System.DateTime").nullable(),
        ))
        .with_member(
            Member::property(
                "Roles",
                TypeDescriptor::container(
                    "System.Collections.Generic.List",
                    vec![TypeDescriptor::primitive("string")],
                )
                .nullable(),
            )
            .with_initializer("[]"),
        )
}

pub fn address_entity() -> Declaration {
    Declaration::class("Sample.Models.Address", MODELS)
        .with_member(
            Member::property("Province", TypeDescriptor::primitive("string"))
                .with_initializer("string.Empty"),
        )
        .with_member(
            Member::property("City", TypeDescriptor::primitive("string"))
                .with_initializer("string.Empty"),
        )
}

pub fn user_info_dto() -> Declaration {
    Declaration::class("Sample.Models.UserInfo", MODELS)
        .partial()
        .with_annotation(
            Annotation::new("Facadegen.DtoAttribute").with_arg(AnnotationValue::TypeRef(user())),
        )
        .with_member(Member::property(
            "Address",
            TypeDescriptor::named("Sample.Models.AddressDto").nullable(),
        ))
}

pub fn address_dto() -> Declaration {
    Declaration::class("Sample.Models.AddressDto", MODELS)
        .partial()
        .with_annotation(
            Annotation::new("Facadegen.DtoAttribute`1")
                .with_type_arg(TypeDescriptor::named("Sample.Models.Address")),
        )
}

pub fn user_service_facade() -> Declaration {
    Declaration::class("Sample.Facades.UserServiceFacade", FACADES)
        .with_interface(TypeDescriptor::named("Sample.Services.IUserService"))
        .with_annotation(Annotation::new("Facadegen.HttpFacadeAttribute").with_arg(string("User")))
        .with_member(
            Member::method("GetUserAsync", task_of(user()))
                .with_param("id", int())
                .with_annotation(verb("Get", Some("{id}"))),
        )
        .with_member(
            Member::method(
                "GetAllUsersAsync",
                task_of(TypeDescriptor::container(
                    "System.Collections.Generic.List",
                    vec![user()],
                )),
            )
            .with_annotation(verb("Get", Some(""))),
        )
        .with_member(
            Member::method("CreateUserAsync", task_of(user()))
                .with_param("name", TypeDescriptor::primitive("string"))
                .with_param("age", int().nullable())
                .with_annotation(verb("Post", None)),
        )
        .with_member(
            Member::method("DeleteUser", TypeDescriptor::primitive("bool"))
                .with_param("id", int())
                .with_annotation(
                    verb("Delete", Some("{id}")).with_named("MethodName", string("MyDeleteUser")),
                ),
        )
        .with_member(Member::method("Debug", TypeDescriptor::primitive("void")))
}

pub fn user_service_interface() -> Declaration {
    Declaration::interface("Sample.Services.IUserService", SERVICES)
}

pub fn sample_graph() -> DeclarationSet {
    DeclarationSet::new(vec![
        user_entity(),
        address_entity(),
        user_info_dto(),
        address_dto(),
        user_service_interface(),
        user_service_facade(),
    ])
}
