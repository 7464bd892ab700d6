use crate::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search strategy selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Bfs,
    AStar,
    Dfs,
}

impl Algorithm {
    /// Selectable algorithms in menu order
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::AStar, Algorithm::Dfs];

    /// Selector literal shown in the menu
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::AStar => "A*",
            Algorithm::Dfs => "DFS",
        }
    }

    /// Next algorithm in menu order, wrapping around
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s.trim())
            .ok_or_else(|| SearchError::InvalidAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("BFS".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("DFS".parse::<Algorithm>().unwrap(), Algorithm::Dfs);
        assert_eq!(
            "Dijkstra".parse::<Algorithm>(),
            Err(SearchError::InvalidAlgorithm("Dijkstra".to_string()))
        );
    }

    #[test]
    fn test_menu_cycles() {
        assert_eq!(Algorithm::Bfs.next(), Algorithm::AStar);
        assert_eq!(Algorithm::AStar.next(), Algorithm::Dfs);
        assert_eq!(Algorithm::Dfs.next(), Algorithm::Bfs);
    }
}
