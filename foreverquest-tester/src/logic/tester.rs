use colored::Colorize;
use foreverquest_game::QuestConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenarios::{ScenarioCtx, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    /// Last note a passing iteration reported, for the report.
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester<'a> {
    config: &'a QuestConfig,
    verbose: bool,
}

impl<'a> LogicTester<'a> {
    pub const fn new(config: &'a QuestConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {seed})",
                        scenario.name.bright_white()
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut durations = Vec::new();
        let mut detail = None;

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let ctx = ScenarioCtx {
                config: self.config,
                seed: iteration_seed,
            };
            let start_time = Instant::now();
            match (scenario.check)(&ctx) {
                Ok(note) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    durations.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) {note}",
                            i + 1,
                            iterations
                        );
                    }
                    detail = Some(note);
                }
                Err(err) => {
                    let message = format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1);
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if durations.is_empty() {
            Duration::ZERO
        } else {
            durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            detail,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_ok(_ctx: &ScenarioCtx<'_>) -> anyhow::Result<String> {
        Ok(String::from("fine"))
    }

    fn odd_seeds_fail(ctx: &ScenarioCtx<'_>) -> anyhow::Result<String> {
        anyhow::ensure!(ctx.seed % 2 == 0, "odd seed");
        Ok(String::new())
    }

    #[test]
    fn iterations_offset_the_seed() {
        let config = QuestConfig::bundled().unwrap();
        let tester = LogicTester::new(&config, false);
        let flaky = TestScenario {
            key: "flaky",
            name: "Flaky",
            description: "fails on odd seeds",
            check: odd_seeds_fail,
        };
        let results = tester.run_scenario(&flaky, &[10], 4);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].successful_iterations, 2);
        assert_eq!(results[0].failures.len(), 2);
        assert!(!results[0].passed);

        let steady = TestScenario {
            key: "steady",
            name: "Steady",
            description: "always passes",
            check: always_ok,
        };
        let results = tester.run_scenario(&steady, &[1, 2], 2);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(results[1].detail.as_deref(), Some("fine"));
    }

    #[test]
    fn results_serialize_durations_as_micros() {
        let result = ScenarioResult {
            scenario_name: "x".into(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            detail: None,
            average_duration: Duration::from_millis(2),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 2000);
    }
}
