use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::{debug, info};
use thiserror::Error;

use super::graph::TreeGraph;
use crate::game::Side;

const GRAPH_NAME: &str = "Min Max graph";
const BACKGROUND: &str = "gray70";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write graph: {0}")]
    Io(#[from] io::Error),
    #[error("graphviz exited with {status}: {stderr}")]
    Graphviz { status: ExitStatus, stderr: String },
}

fn fill_color(side: Side) -> &'static str {
    match side {
        Side::White => "white",
        Side::Black => "black",
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn with_extension_appended(path: &Path, extension: &str) -> PathBuf {
    let mut file: OsString = path.as_os_str().to_owned();
    file.push(".");
    file.push(extension);
    PathBuf::from(file)
}

impl TreeGraph {
    /// Graphviz DOT source for the graph.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        // writing into a String cannot fail
        let _ = writeln!(dot, "digraph {} {{", quote(GRAPH_NAME));
        let _ = writeln!(dot, "  bgcolor={}", quote(BACKGROUND));

        for node in self.nodes() {
            let _ = writeln!(
                dot,
                "  {} [label={} style=filled color={} fontcolor={} shape={} tooltip={}]",
                node.id,
                quote(&node.label),
                fill_color(node.fill),
                fill_color(node.fill.opposite()),
                node.shape.as_str(),
                quote(node.tooltip.as_deref().unwrap_or("")),
            );
        }

        for edge in self.edges() {
            let color = fill_color(edge.color);
            let _ = writeln!(
                dot,
                "  {} -> {} [constraint=true color={} fontcolor={} label={}]",
                edge.from,
                edge.to,
                color,
                color,
                quote(&edge.label),
            );
        }

        dot.push_str("}\n");
        dot
    }

    /// Writes the DOT source to `writer`, e.g. stdout for piping into a viewer.
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_dot().as_bytes())?;
        writer.flush()
    }

    /// Writes `<path>.gv` and renders it with `dot` into `<path>.<format>`.
    ///
    /// Returns the path of the rendered image.
    pub fn render_to_file(&self, path: &Path, format: &str) -> Result<PathBuf, RenderError> {
        let source = with_extension_appended(path, "gv");
        let output = with_extension_appended(path, format);

        fs::write(&source, self.to_dot())?;
        debug!(
            "wrote {} nodes and {} edges to {}",
            self.nodes().len(),
            self.edges().len(),
            source.display()
        );

        let result = Command::new("dot")
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(&output)
            .arg(&source)
            .output()?;

        if !result.status.success() {
            return Err(RenderError::Graphviz {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        info!("rendered {}", output.display());
        Ok(output)
    }
}
