//! UCI info line types.

/// Score in centipawns or mate distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N moves (positive = engine winning, negative = engine losing).
    Mate(i32),
}

/// Search information from engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    pub score: Option<Score>,
    /// Nodes searched.
    pub nodes: Option<u64>,
    /// Time spent in milliseconds.
    pub time: Option<u64>,
    /// Principal variation (best line found).
    pub pv: Vec<String>,
    /// Free text; always last on the line.
    pub string: Option<String>,
}

impl EngineInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format as UCI info string.
    pub fn to_uci(&self) -> String {
        let mut parts = vec!["info".to_string()];

        if let Some(d) = self.depth {
            parts.push(format!("depth {}", d));
        }
        match self.score {
            Some(Score::Cp(cp)) => parts.push(format!("score cp {}", cp)),
            Some(Score::Mate(m)) => parts.push(format!("score mate {}", m)),
            None => {}
        }
        if let Some(n) = self.nodes {
            parts.push(format!("nodes {}", n));
        }
        if let Some(t) = self.time {
            parts.push(format!("time {}", t));
        }
        if !self.pv.is_empty() {
            parts.push(format!("pv {}", self.pv.join(" ")));
        }
        if let Some(ref s) = self.string {
            parts.push(format!("string {}", s));
        }

        parts.join(" ")
    }

    /// Parse a UCI info line. Unknown keywords are skipped.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().peekable();
        if parts.next() != Some("info") {
            return None;
        }

        let mut info = EngineInfo::new();
        while let Some(token) = parts.next() {
            match token {
                "depth" => info.depth = parts.next().and_then(|v| v.parse().ok()),
                "nodes" => info.nodes = parts.next().and_then(|v| v.parse().ok()),
                "time" => info.time = parts.next().and_then(|v| v.parse().ok()),
                "score" => {
                    let kind = parts.next();
                    let value = parts.next().and_then(|v| v.parse().ok());
                    info.score = match (kind, value) {
                        (Some("cp"), Some(v)) => Some(Score::Cp(v)),
                        (Some("mate"), Some(v)) => Some(Score::Mate(v)),
                        _ => info.score,
                    };
                }
                "pv" => {
                    while let Some(mv) = parts.next_if(|s| !is_info_keyword(s)) {
                        info.pv.push(mv.to_string());
                    }
                }
                "string" => {
                    info.string = Some(parts.by_ref().collect::<Vec<_>>().join(" "));
                }
                _ => {}
            }
        }

        Some(info)
    }
}

fn is_info_keyword(s: &str) -> bool {
    matches!(
        s,
        "depth" | "seldepth" | "score" | "nodes" | "nps" | "time" | "pv" | "currmove" | "hashfull"
            | "string"
    )
}

/// Builder for constructing EngineInfo.
#[derive(Default)]
pub struct InfoBuilder {
    info: EngineInfo,
}

impl InfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(mut self, d: u32) -> Self {
        self.info.depth = Some(d);
        self
    }

    pub fn score_cp(mut self, cp: i32) -> Self {
        self.info.score = Some(Score::Cp(cp));
        self
    }

    pub fn nodes(mut self, n: u64) -> Self {
        self.info.nodes = Some(n);
        self
    }

    pub fn time(mut self, ms: u64) -> Self {
        self.info.time = Some(ms);
        self
    }

    pub fn pv(mut self, moves: Vec<String>) -> Self {
        self.info.pv = moves;
        self
    }

    pub fn string(mut self, s: &str) -> Self {
        self.info.string = Some(s.to_string());
        self
    }

    pub fn build(self) -> EngineInfo {
        self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_to_uci() {
        let info = InfoBuilder::new()
            .depth(3)
            .score_cp(-2)
            .nodes(9322)
            .pv(vec!["e2e4".to_string()])
            .build();

        assert_eq!(info.to_uci(), "info depth 3 score cp -2 nodes 9322 pv e2e4");
    }

    #[test]
    fn parse_info() {
        let line = "info depth 12 seldepth 18 score cp 30 nodes 125000 pv e2e4 e7e5 g1f3 time 40";
        let info = EngineInfo::parse(line).unwrap();

        assert_eq!(info.depth, Some(12));
        assert_eq!(info.score, Some(Score::Cp(30)));
        assert_eq!(info.nodes, Some(125000));
        assert_eq!(info.pv, vec!["e2e4", "e7e5", "g1f3"]);
        assert_eq!(info.time, Some(40));
    }

    #[test]
    fn parse_mate_and_string() {
        let info = EngineInfo::parse("info score mate -3 string board size 10").unwrap();
        assert_eq!(info.score, Some(Score::Mate(-3)));
        assert_eq!(info.string.as_deref(), Some("board size 10"));
    }

    #[test]
    fn non_info_lines() {
        assert!(EngineInfo::parse("bestmove e2e4").is_none());
        assert!(EngineInfo::parse("").is_none());
    }
}
