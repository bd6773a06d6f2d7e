//! Built-in submission presets.

use shared::domain::ScenarioKind;

pub const LIVE_EDITOR: &str = "Live Editor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub github_url: &'static str,
    /// Locked presets are read-only demonstration content.
    pub locked: bool,
    pub kind: ScenarioKind,
}

static BUILTIN: &[Scenario] = &[
    Scenario {
        name: LIVE_EDITOR,
        title: "",
        description: "",
        github_url: "",
        locked: false,
        kind: ScenarioKind::None,
    },
    Scenario {
        name: "Good Submission",
        title: "Enterprise-Grade Distributed Task Processing System with Resilience and Monitoring",
        description: "Objective: To architect and implement a horizontally scalable task processing engine. \
Requirements include high availability via multi-node deployments, failure resilience using exponential \
backoff with dead-letter queues, and real-time observability. The goal is to ensure 99.9% uptime by \
utilizing production-grade monitoring suites like Prometheus and Grafana. This requirement covers security \
constraints for mTLS and internal authentication. The purpose is to handle high-throughput workloads with \
sub-50ms latency while maintaining full database consistency across shards. Performance optimization is \
achieved through efficient connection pooling and asynchronous execution patterns. Final success criteria: \
100% test coverage and full audit logging.",
        github_url: "https://github.com/fastapi/fastapi",
        locked: true,
        kind: ScenarioKind::Good,
    },
    Scenario {
        name: "Partial Submission",
        title: "Standard API Implementation for Basic Data Operations and Storage",
        description: "Requirement: The objective is to build an API that connects to a SQL database. \
It should handle GET and POST requests for user data. Some security constraints like basic auth should be \
added eventually. The purpose is to make the system work for the initial release. We need to handle basic \
database connections and ensure some error handling is present in the main controller.",
        github_url: "https://github.com/encode/uvicorn",
        locked: true,
        kind: ScenarioKind::Partial,
    },
    Scenario {
        name: "Poor Submission",
        title: "Fix fast",
        description: "fix the bugs in the code quickly. make it run without error. just get it done today.",
        github_url: "",
        locked: true,
        kind: ScenarioKind::Poor,
    },
];

/// Immutable, ordered lookup of presets. Always holds at least one unlocked
/// entry, which is the default selection.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCatalog {
    scenarios: &'static [Scenario],
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScenarioCatalog {
    pub fn builtin() -> Self {
        Self { scenarios: BUILTIN }
    }

    pub fn get(&self, name: &str) -> Option<&'static Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|scenario| scenario.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Scenario> {
        self.scenarios.iter()
    }

    pub fn default_scenario(&self) -> &'static Scenario {
        self.scenarios
            .iter()
            .find(|scenario| !scenario.locked)
            .unwrap_or(&BUILTIN[0])
    }
}
