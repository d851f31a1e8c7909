//! Rendering of the interface declaration
//!
//! Layout, in order:
//! 1. `package <name>` and a blank line, when a package is set
//! 2. every injected line (with `\n` and `\t` escapes expanded) and a blank line
//! 3. the interface header, one tab-indented signature per line, and `}`
//!
//! The first failed write aborts rendering.

use crate::error::AssembleResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Header form of the generated interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceStyle {
    /// `interface <name> {`
    #[default]
    Bare,
    /// `type <name> interface {`, valid Go source
    Go,
}

impl InterfaceStyle {
    fn header(self, name: &str) -> String {
        match self {
            Self::Bare => format!("interface {name} {{"),
            Self::Go => format!("type {name} interface {{"),
        }
    }
}

impl fmt::Display for InterfaceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare => write!(f, "bare"),
            Self::Go => write!(f, "go"),
        }
    }
}

/// Builder for one rendered interface
#[derive(Debug, Clone)]
pub struct Assembler {
    interface_name: String,
    package_name: Option<String>,
    inject: Vec<String>,
    style: InterfaceStyle,
}

impl Assembler {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
            package_name: None,
            inject: Vec::new(),
            style: InterfaceStyle::default(),
        }
    }

    /// Emit a package header; empty names are ignored
    #[must_use]
    pub fn with_package(mut self, package_name: Option<impl Into<String>>) -> Self {
        self.package_name = package_name.map(Into::into).filter(|name| !name.is_empty());
        self
    }

    /// Raw lines placed between the package header and the interface
    #[must_use]
    pub fn with_inject<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inject = lines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: InterfaceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    /// Write the declaration for `signatures`, in the given order
    pub fn render<W: Write + ?Sized>(&self, signatures: &[String], w: &mut W) -> AssembleResult<()> {
        if let Some(package) = &self.package_name {
            write!(w, "package {package}\n\n")?;
        }

        if !self.inject.is_empty() {
            for line in &self.inject {
                writeln!(w, "{}", expand_escapes(line))?;
            }
            writeln!(w)?;
        }

        writeln!(w, "{}", self.style.header(&self.interface_name))?;
        for signature in signatures {
            writeln!(w, "\t{signature}")?;
        }
        writeln!(w, "}}")?;

        Ok(())
    }

    /// Render into a `String`
    pub fn render_to_string(&self, signatures: &[String]) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.render(signatures, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Replace literal `\n` and `\t` escape sequences with the characters
fn expand_escapes(line: &str) -> String {
    line.replace("\\n", "\n").replace("\\t", "\t")
}

/// Render an interface with the default style.
///
/// `package_name` and `inject` are optional; pass `None` / an empty slice to
/// skip them.
pub fn assemble<W: Write + ?Sized>(
    interface_name: &str,
    package_name: Option<&str>,
    inject: &[String],
    signatures: &[String],
    w: &mut W,
) -> AssembleResult<()> {
    Assembler::new(interface_name)
        .with_package(package_name)
        .with_inject(inject.iter().cloned())
        .render(signatures, w)
}
