use super::tree::StrategyTree;
use std::fmt::Write;

/// per-depth accounting of a finished strategy tree: how many
/// secrets are revealed by 1, 2, 3, ... guesses, and the total.
pub struct TreeInfo {
    name: String,
    depth_freq: Vec<u32>,
    total_depth: u32,
    total_secrets: u32,
}

impl TreeInfo {
    const LEVELS: usize = 10;

    pub fn new(name: &str, tree: &StrategyTree) -> Self {
        let (depth_freq, total_depth) = tree.depth_info(Self::LEVELS);
        Self {
            name: name.to_string(),
            total_secrets: depth_freq.iter().sum(),
            depth_freq,
            total_depth,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_depth
    }
    pub fn total_secrets(&self) -> u32 {
        self.total_secrets
    }
    pub fn count_depth(&self, depth: usize) -> u32 {
        self.depth_freq.get(depth - 1).copied().unwrap_or(0)
    }
    pub fn max_depth(&self) -> usize {
        self.depth_freq
            .iter()
            .rposition(|n| *n > 0)
            .map(|i| i + 1)
            .unwrap_or(0)
    }
    pub fn average_depth(&self) -> f64 {
        self.total_depth as f64 / self.total_secrets as f64
    }

    pub fn header() -> String {
        format!(
            "{:>8}: {:>6} {:>5} {}",
            "strategy",
            "total",
            "avg",
            (1..=Self::LEVELS)
                .map(|d| format!("{:>5}", d))
                .collect::<String>()
        )
    }
}

impl std::fmt::Display for TreeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>8}: {:>6} {:>5.3}",
            self.name,
            self.total_steps(),
            self.average_depth()
        )?;
        for d in 1..=Self::LEVELS {
            match self.count_depth(d) {
                0 => write!(f, "{:>5}", "-")?,
                n => write!(f, "{:>5}", n)?,
            }
        }
        Ok(())
    }
}

/// render a tree in the Irving convention: one line per node,
/// `guess:response`, indented two spaces per level, leaves
/// carrying the perfect response and no children.
pub fn write_text(tree: &StrategyTree) -> String {
    let rules = tree.rules();
    let mut out = String::new();
    for node in tree.nodes().iter().skip(1) {
        let _ = writeln!(
            out,
            "{:indent$}{}:{}",
            "",
            rules.format(node.guess()),
            node.response(),
            indent = 2 * (node.depth() - 1)
        );
    }
    out
}

/// render a tree as XML: a summary of steps-per-depth counts,
/// then the nested guess/feedback states, closed in pre-order
/// as the depth decreases.
pub fn write_xml(tree: &StrategyTree) -> String {
    let rules = tree.rules();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<mastermind-strategy pegs=\"{}\" colors=\"{}\" repeatable=\"{}\">",
        rules.pegs(),
        rules.colors(),
        rules.repeatable()
    );

    let info = TreeInfo::new("", tree);
    let _ = writeln!(out, "<summary totalsteps=\"{}\">", info.total_steps());
    for depth in 1..=info.max_depth() {
        if info.count_depth(depth) > 0 {
            let _ = writeln!(
                out,
                "  <where steps=\"{}\" count=\"{}\"/>",
                depth,
                info.count_depth(depth)
            );
        }
    }
    let _ = writeln!(out, "</summary>");

    let _ = writeln!(out, "<details>");
    let nodes = tree.nodes();
    let mut open: Vec<usize> = Vec::new();
    for (i, node) in nodes.iter().enumerate().skip(1) {
        while open.last().is_some_and(|d| *d >= node.depth()) {
            let depth = open.pop().unwrap();
            let _ = writeln!(out, "{:indent$}</state>", "", indent = 2 * depth);
        }
        let indent = 2 * node.depth();
        let state = format!(
            "state guess=\"{}\" feedback=\"{}\"",
            rules.format(node.guess()),
            node.response()
        );
        let parental = nodes.get(i + 1).is_some_and(|next| next.depth() > node.depth());
        if parental {
            let _ = writeln!(out, "{:indent$}<{}>", "", state, indent = indent);
            open.push(node.depth());
        } else {
            let _ = writeln!(out, "{:indent$}<{}/>", "", state, indent = indent);
        }
    }
    while let Some(depth) = open.pop() {
        let _ = writeln!(out, "{:indent$}</state>", "", indent = 2 * depth);
    }
    let _ = writeln!(out, "</details>");
    let _ = writeln!(out, "</mastermind-strategy>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::rules::Rules;
    use crate::filters::filter::Filter;
    use crate::solve::builder::build_strategy_tree;
    use crate::solve::cost::Constraints;
    use crate::solve::heuristic::Heuristic;
    use crate::solve::strategy::Strategy;

    fn tree() -> StrategyTree {
        let engine = crate::engine::engine::Engine::new(Rules::try_from("p2c3r").unwrap());
        build_strategy_tree(
            &engine,
            &Strategy::Heuristic(Heuristic::MinAvg),
            &Filter::standard(engine.rules()),
            &Constraints::default(),
        )
    }

    #[test]
    fn text_lines_match_nodes() {
        let tree = tree();
        let text = write_text(&tree);
        assert!(text.lines().count() == tree.len() - 1);
        // each line is guess:response at two spaces per level
        for (line, node) in text.lines().zip(tree.nodes().iter().skip(1)) {
            let expected = 2 * (node.depth() - 1);
            let leading = line.len() - line.trim_start().len();
            assert!(leading == expected);
            assert!(line.trim_start().contains(':'));
        }
    }

    #[test]
    fn xml_tags_balance() {
        let tree = tree();
        let xml = write_xml(&tree);
        let opens = xml.matches("<state ").count();
        let empty = xml.matches("/>").count() - xml.matches("<where").count();
        let closes = xml.matches("</state>").count();
        assert!(opens == empty + closes);
        assert!(xml.contains("<mastermind-strategy pegs=\"2\" colors=\"3\" repeatable=\"true\">"));
        assert!(xml.ends_with("</mastermind-strategy>\n"));
    }

    #[test]
    fn summary_counts_all_secrets() {
        let tree = tree();
        let info = TreeInfo::new("minavg", &tree);
        assert!(info.total_secrets() == 9);
        let sum: u32 = (1..=10).map(|d| info.count_depth(d)).sum();
        assert!(sum == 9);
        let row = format!("{}", info);
        assert!(row.contains("minavg"));
    }
}
