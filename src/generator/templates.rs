use askama::Template;

/// One generated action on a controller
#[derive(Debug, Clone)]
pub struct ActionView {
    /// Rendered attribute lines, verb attribute first
    pub attributes: Vec<String>,
    pub return_type: String,
    pub name: String,
    /// Comma-joined generated parameter list
    pub parameters: String,
    /// Service member called through to
    pub service_member: String,
    /// Comma-joined call-through argument list
    pub arguments: String,
}

/// Template data for a controller unit
#[derive(Template)]
#[template(path = "controller.cs.txt", escape = "none")]
pub struct ControllerTemplateData {
    /// Identity of the facade declaration
    pub source: String,
    pub usings: Vec<String>,
    pub namespace: String,
    pub class_name: String,
    pub service_type: String,
    pub actions: Vec<ActionView>,
}

/// One request-envelope record
#[derive(Debug, Clone)]
pub struct RecordView {
    pub name: String,
    /// Comma-joined positional components
    pub components: String,
}

/// Template data for the request envelopes of one facade
#[derive(Template)]
#[template(path = "requests.cs.txt", escape = "none")]
pub struct RequestsTemplateData {
    pub source: String,
    pub usings: Vec<String>,
    pub namespace: String,
    pub records: Vec<RecordView>,
}

/// One projected dto property
#[derive(Debug, Clone)]
pub struct PropertyView {
    pub attributes: Vec<String>,
    pub ty: String,
    pub name: String,
    /// ` = <text>;` when the entity property has an initializer, else empty
    pub initializer: String,
}

/// Template data for a dto unit
#[derive(Template)]
#[template(path = "dto.cs.txt", escape = "none")]
pub struct DtoTemplateData {
    pub source: String,
    pub usings: Vec<String>,
    pub namespace: String,
    pub class_name: String,
    pub properties: Vec<PropertyView>,
}

/// Render a template, normalizing to exactly one trailing newline.
pub fn render_unit<T: Template>(template: &T) -> anyhow::Result<String> {
    let mut text = template.render()?;
    let trimmed = text.trim_end().len();
    text.truncate(trimmed);
    text.push('\n');
    Ok(text)
}
