use colored::Colorize;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use chargen_game::{CharacterDocument, GenerationParams, RuleSystem, Seed};

use super::checks::check_document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub rules: String,
    pub passed: bool,
    pub documents_checked: usize,
    pub successful_documents: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

/// Generates documents for one rule system and verifies replay and shape.
pub struct SweepTester {
    params: GenerationParams,
    verbose: bool,
}

impl SweepTester {
    pub const fn new(params: GenerationParams, verbose: bool) -> Self {
        Self { params, verbose }
    }

    /// Check every seed once: generate twice, compare fingerprints and run
    /// the document checks on the first copy.
    pub fn run_rules(&self, system: &RuleSystem, seeds: &[Seed]) -> SweepResult {
        if self.verbose {
            println!(
                "🧪 Sweeping {} ({}) over {} seeds",
                system.id().bright_white(),
                system.label(),
                seeds.len()
            );
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let start_time = Instant::now();
            let outcome = self.check_seed(system, seed);
            performance_data.push(start_time.elapsed());

            match outcome {
                Ok(()) => {
                    debug!("{} seed {seed} passed", system.id());
                    successes += 1;
                }
                Err(err) => {
                    warn!("{} seed {seed} failed: {err}", system.id());
                    if self.verbose {
                        println!("  ❌ seed {seed}: {}", err.clone().red());
                    }
                    failures.push(format!("seed {seed}: {err}"));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(u32::MAX)
        };

        SweepResult {
            rules: system.id().to_string(),
            passed: failures.is_empty(),
            documents_checked: seeds.len(),
            successful_documents: successes,
            failures,
            average_duration,
            performance_data,
        }
    }

    fn check_seed(&self, system: &RuleSystem, seed: &Seed) -> Result<(), String> {
        let first = self.generate(system, seed)?;
        let second = self.generate(system, seed)?;
        if first.fingerprint() != second.fingerprint() {
            return Err(format!(
                "replay drifted ({:016x} != {:016x})",
                first.fingerprint(),
                second.fingerprint()
            ));
        }
        if first.metadata.seed != *seed {
            return Err(format!("metadata.seed is {}", first.metadata.seed));
        }

        let violations = check_document(system, &first);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }

    fn generate(&self, system: &RuleSystem, seed: &Seed) -> Result<CharacterDocument, String> {
        system
            .generate(seed.clone(), self.params)
            .map_err(|err| format!("generation failed: {err}"))
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

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_game::Registry;

    #[test]
    fn builtin_systems_sweep_clean() {
        let tester = SweepTester::new(GenerationParams::default(), false);
        let seeds: Vec<Seed> = ["1337", "abc", "zz"].into_iter().map(Seed::parse).collect();
        for system in Registry::builtin().systems() {
            let result = tester.run_rules(system, &seeds);
            assert!(result.passed, "{}: {:?}", result.rules, result.failures);
            assert_eq!(result.documents_checked, 3);
            assert_eq!(result.successful_documents, 3);
            assert_eq!(result.performance_data.len(), 3);
        }
    }

    #[test]
    fn sweep_result_serializes_durations_as_micros() {
        let result = SweepResult {
            rules: "cod".into(),
            passed: true,
            documents_checked: 1,
            successful_documents: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(250),
            performance_data: vec![Duration::from_micros(250)],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["average_duration"], 250);
        let back: SweepResult = serde_json::from_value(value).unwrap();
        assert_eq!(back.performance_data, result.performance_data);
    }
}
