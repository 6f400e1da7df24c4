use crate::web::fyyur::form_values::{BoolFormValue, FormValue, FormValueRepresentation};
use askama::Template;

#[derive(Debug, PartialEq)]
pub enum InputType {
    Text,
    Url,
    Tel,
    DateTimeLocal,
    Integer,
    Textarea,
}

impl InputType {
    fn as_html_type_attr(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Tel => "tel",
            InputType::DateTimeLocal => "datetime-local",
            InputType::Integer => "number",
            _ => panic!("Input type {:?} should be handled separately.", self),
        }
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    label: &'a str,
    input_type: InputType,
    info: Option<&'a str>,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> FormFieldTemplate<'a, T> {
    pub fn new(data: &'a FormValue<T>, name: &'a str, label: &'a str) -> Self {
        Self {
            name,
            label,
            input_type: InputType::Text,
            info: None,
            data,
        }
    }

    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_info(mut self, info: &'a str) -> Self {
        self.info = Some(info);
        self
    }
}

#[derive(Template)]
#[template(path = "sub_templates/checkbox.html")]
pub struct CheckboxTemplate<'a> {
    name: &'a str,
    label: &'a str,
    data: &'a BoolFormValue,
}

impl<'a> CheckboxTemplate<'a> {
    pub fn new(data: &'a BoolFormValue, name: &'a str, label: &'a str) -> Self {
        Self { name, label, data }
    }
}
