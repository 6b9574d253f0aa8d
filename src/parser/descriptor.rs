//! JVM method descriptor parsing and human-readable method rendering.
//!
//! A descriptor such as `(Ljava/lang/String;I[J)V` encodes the argument
//! and return types of a method. Frame labels are rendered from the
//! declaring class, method name and the parsed descriptor.

use std::iter::Peekable;
use std::str::Chars;

/// A Java type decoded from a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    /// Primitive type or `void`, by Java keyword
    Primitive(&'static str),
    /// Class type, fully qualified with dots
    Object(String),
    /// Array of the inner type
    Array(Box<JavaType>),
}

impl JavaType {
    /// Render the type as Java source would spell it
    pub fn render(&self, qualified: bool) -> String {
        match self {
            JavaType::Primitive(name) => (*name).to_string(),
            JavaType::Object(name) if qualified => name.clone(),
            JavaType::Object(name) => simple_name(name).to_string(),
            JavaType::Array(inner) => format!("{}[]", inner.render(qualified)),
        }
    }
}

/// Argument and return types of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub arguments: Vec<JavaType>,
    pub return_type: JavaType,
}

/// Frame label rendering flags, resolved once per run
///
/// **Public** - consumed by `Method::render` and the stack normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix the label with the return type
    pub show_return_value: bool,

    /// Use fully qualified class names
    pub qualified: bool,

    /// Render the argument list
    pub show_arguments: bool,

    /// Append `:<line>` to each frame
    pub line_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_return_value: false,
            qualified: true,
            show_arguments: true,
            line_numbers: true,
        }
    }
}

impl RenderOptions {
    /// Resolve the CLI toggles into a single set of flags
    ///
    /// Simple names turn off qualification, arguments and the return value
    /// no matter how those were set individually.
    pub fn resolve(
        show_return_value: bool,
        use_simple_names: bool,
        hide_arguments: bool,
        ignore_line_numbers: bool,
    ) -> Self {
        if use_simple_names {
            return Self {
                show_return_value: false,
                qualified: false,
                show_arguments: false,
                line_numbers: !ignore_line_numbers,
            };
        }

        Self {
            show_return_value,
            qualified: true,
            show_arguments: !hide_arguments,
            line_numbers: !ignore_line_numbers,
        }
    }
}

/// Parse a JVM method descriptor
///
/// Returns `None` when the descriptor is malformed.
pub fn parse_descriptor(descriptor: &str) -> Option<MethodSignature> {
    let mut chars = descriptor.chars().peekable();
    if chars.next()? != '(' {
        return None;
    }

    let mut arguments = Vec::new();
    loop {
        if chars.peek() == Some(&')') {
            chars.next();
            break;
        }
        arguments.push(parse_type(&mut chars)?);
    }

    let return_type = parse_type(&mut chars)?;
    if chars.next().is_some() {
        return None;
    }

    Some(MethodSignature {
        arguments,
        return_type,
    })
}

/// Parse one field type (or `V`) from the front of the iterator
fn parse_type(chars: &mut Peekable<Chars<'_>>) -> Option<JavaType> {
    let java_type = match chars.next()? {
        'B' => JavaType::Primitive("byte"),
        'C' => JavaType::Primitive("char"),
        'D' => JavaType::Primitive("double"),
        'F' => JavaType::Primitive("float"),
        'I' => JavaType::Primitive("int"),
        'J' => JavaType::Primitive("long"),
        'S' => JavaType::Primitive("short"),
        'Z' => JavaType::Primitive("boolean"),
        'V' => JavaType::Primitive("void"),
        'L' => {
            let mut name = String::new();
            loop {
                match chars.next()? {
                    ';' => break,
                    '/' => name.push('.'),
                    c => name.push(c),
                }
            }
            if name.is_empty() {
                return None;
            }
            JavaType::Object(name)
        }
        '[' => JavaType::Array(Box::new(parse_type(chars)?)),
        _ => return None,
    };
    Some(java_type)
}

/// Strip the package from a qualified class name
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Render a method label from its parts
///
/// Examples with default options:
/// - `java.lang.Thread.run()`
/// - `java.util.HashMap.put(java.lang.Object, java.lang.Object)`
pub fn render_method(
    class_name: &str,
    name: &str,
    descriptor: &str,
    options: &RenderOptions,
) -> String {
    let signature = parse_descriptor(descriptor);
    let mut label = String::new();

    if options.show_return_value {
        if let Some(signature) = &signature {
            label.push_str(&signature.return_type.render(options.qualified));
            label.push(' ');
        }
    }

    if options.qualified {
        label.push_str(class_name);
    } else {
        label.push_str(simple_name(class_name));
    }
    label.push('.');
    label.push_str(name);

    if options.show_arguments {
        label.push('(');
        match &signature {
            Some(signature) => {
                let arguments: Vec<String> = signature
                    .arguments
                    .iter()
                    .map(|arg| arg.render(options.qualified))
                    .collect();
                label.push_str(&arguments.join(", "));
            }
            // Keep whatever we were given rather than dropping the frame
            None => label.push_str(descriptor),
        }
        label.push(')');
    }

    label
}
