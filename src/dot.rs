//! Kripke structure to DOT (Graphviz) conversion.
//!
//! This module renders a [`Kripke`] structure as a directed graph in DOT
//! format, which can be visualized with Graphviz tools like `dot` or online
//! viewers.
//!
//! # DOT Format
//!
//! - Each state becomes one node, labeled with its label sequence (one line
//!   per label).
//! - Initial states are drawn with a distinct shape (default: doublecircle).
//! - Each edge becomes one directed `->` line.
//!
//! # Examples
//!
//! ```
//! use bsa_rs::kripke::Kripke;
//!
//! let k: Kripke<&str> = Kripke::singleton(vec!["x <= 10"]);
//! let dot = k.to_dot().unwrap();
//! assert!(dot.starts_with("digraph"));
//! // Write to a file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::{Display, Write as _};

use crate::kripke::Kripke;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary states (default: "circle")
    pub state_shape: &'static str,
    /// Shape for initial states (default: "doublecircle")
    pub initial_shape: &'static str,
    /// Layout direction (default: "LR")
    pub rankdir: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            state_shape: "circle",
            initial_shape: "doublecircle",
            rankdir: "LR",
        }
    }
}

impl<L: Clone + Display> Kripke<L> {
    /// Converts the structure to DOT (Graphviz) format with default
    /// settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use bsa_rs::kripke::Kripke;
    ///
    /// let a: Kripke<&str> = Kripke::singleton(vec!["a"]);
    /// let b: Kripke<&str> = Kripke::singleton(vec!["b"]);
    /// let dot = a.join(&b).to_dot().unwrap();
    /// println!("{}", dot);
    /// ```
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the structure to DOT format with custom configuration.
    ///
    /// ```
    /// use bsa_rs::dot::DotConfig;
    /// use bsa_rs::kripke::Kripke;
    ///
    /// let k: Kripke<&str> = Kripke::singleton(vec![]);
    /// let config = DotConfig {
    ///     rankdir: "TB",
    ///     ..DotConfig::default()
    /// };
    /// let dot = k.to_dot_with_config(&config).unwrap();
    /// ```
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "node [shape={}];", config.state_shape)?;

        let initial = self.initial_states();
        for &state in self.states() {
            let labels = self
                .labels_for(state)
                .unwrap_or_default()
                .iter()
                .map(|label| escape(&label.to_string()))
                .collect::<Vec<_>>()
                .join("\\n");

            if initial.contains(&state) {
                writeln!(
                    dot,
                    "{} [shape={}, label=\"{}\"];",
                    state, config.initial_shape, labels
                )?;
            } else {
                writeln!(dot, "{} [label=\"{}\"];", state, labels)?;
            }
        }

        for edge in self.edges() {
            writeln!(dot, "{};", edge)?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use crate::kripke::{Edge, State};

    #[test]
    fn test_singleton_dot() {
        let k: Kripke<&str> = Kripke::singleton(vec!["x <= 10"]);
        let dot = k.to_dot().unwrap();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("shape=doublecircle"));
        assert!(dot.contains("label=\"x <= 10\""));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn test_edges_rendered() {
        let states = vec![State::fresh(), State::fresh()];
        let edges = vec![
            Edge::new(states[0], states[1]),
            Edge::new(states[1], states[0]),
        ];
        let k: Kripke<&str> =
            Kripke::new(states.clone(), HashMap::new(), HashMap::new(), edges);

        let dot = k.to_dot().unwrap();
        let arrows = dot.matches("->").count();
        assert_eq!(arrows, 2);
        assert!(dot.contains(&format!("{} -> {};", states[0], states[1])));
        // No initial states here, so the ordinary shape applies.
        assert!(!dot.contains("doublecircle"));
    }

    #[test]
    fn test_multiple_labels_joined() {
        let k: Kripke<&str> = Kripke::singleton(vec!["a <= 1", "b >= 2"]);
        let dot = k.to_dot().unwrap();
        assert!(dot.contains("label=\"a <= 1\\nb >= 2\""));
    }
}
