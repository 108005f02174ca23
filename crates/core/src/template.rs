//! URL template expansion for the RFC 6570 subset Graph templates use.

use std::collections::BTreeMap;

use crate::error::{GraphError, Result};

/// A value bound to a template variable.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl TemplateValue {
    fn render(&self, reserved: bool) -> Option<String> {
        let encode = |s: &str| {
            if reserved {
                s.to_string()
            } else {
                urlencoding::encode(s).into_owned()
            }
        };
        match self {
            TemplateValue::String(s) => Some(encode(s)),
            TemplateValue::Int(i) => Some(i.to_string()),
            TemplateValue::Bool(b) => Some(b.to_string()),
            TemplateValue::List(items) if items.is_empty() => None,
            TemplateValue::List(items) => Some(
                items
                    .iter()
                    .map(|s| encode(s))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<i64> for TemplateValue {
    fn from(i: i64) -> Self {
        TemplateValue::Int(i)
    }
}

impl From<i32> for TemplateValue {
    fn from(i: i32) -> Self {
        TemplateValue::Int(i64::from(i))
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(items: Vec<String>) -> Self {
        TemplateValue::List(items)
    }
}

/// Expand `template` with `vars`. Undefined variables expand to nothing.
pub fn expand(template: &str, vars: &BTreeMap<String, TemplateValue>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| GraphError::UrlTemplate {
            template: template.to_string(),
            reason: format!("unclosed expression at offset {}", template.len() - rest.len() + open),
        })?;
        expand_expression(template, &after[..close], vars, &mut out)?;
        rest = &after[close + 1..];
    }
    if rest.contains('}') {
        return Err(GraphError::UrlTemplate {
            template: template.to_string(),
            reason: "unmatched '}'".into(),
        });
    }
    out.push_str(rest);
    Ok(out)
}

fn expand_expression(
    template: &str,
    expression: &str,
    vars: &BTreeMap<String, TemplateValue>,
    out: &mut String,
) -> Result<()> {
    let (operator, names) = match expression.chars().next() {
        Some(op @ ('+' | '?' | '&')) => (Some(op), &expression[1..]),
        Some('#' | '.' | '/' | ';') => {
            return Err(GraphError::UrlTemplate {
                template: template.to_string(),
                reason: format!("unsupported operator in '{{{expression}}}'"),
            });
        }
        Some(_) => (None, expression),
        None => {
            return Err(GraphError::UrlTemplate {
                template: template.to_string(),
                reason: "empty expression".into(),
            });
        }
    };

    match operator {
        Some('?') | Some('&') => {
            let mut first = operator == Some('?');
            for name in names.split(',') {
                let Some(rendered) = vars.get(name).and_then(|v| v.render(false)) else {
                    continue;
                };
                out.push(if first { '?' } else { '&' });
                first = false;
                out.push_str(name);
                out.push('=');
                out.push_str(&rendered);
            }
        }
        _ => {
            let reserved = operator == Some('+');
            let rendered: Vec<String> = names
                .split(',')
                .filter_map(|name| vars.get(name).and_then(|v| v.render(reserved)))
                .collect();
            out.push_str(&rendered.join(","));
        }
    }
    Ok(())
}
