//! A small release-name grammar driven over the engine
//!
//! Each fragment is tried as an episode identifier, then as a video quality, and falls back
//! to being part of the show name. Every failed attempt is rewound before the next one.

use tagwalk::walk::capture::CaptureRule;
use tagwalk::walk::config::{EngineConfig, SinglePolicy};
use tagwalk::walk::loader::ClosureLoader;
use tagwalk::walk::result::CaptureResult;
use tagwalk::walk::testing::closures_from_text;
use tagwalk::{Closure, Engine, Grammar, WalkResult};

struct ReleaseGrammar;

impl ReleaseGrammar {
    fn attempt(engine: &mut Engine, tag: &str, pattern: &str) -> WalkResult<bool> {
        engine.next_fragment()?;
        let rule = CaptureRule::new().regex(pattern)?;
        if engine.capture_fragment(tag, rule).execute()? {
            engine.commit();
            return Ok(true);
        }
        engine.rewind();
        Ok(false)
    }
}

impl Grammar for ReleaseGrammar {
    type Output = CaptureResult;

    fn run(&mut self, engine: &mut Engine, closures: Vec<Closure>) -> WalkResult<CaptureResult> {
        engine.setup(closures)?;

        while engine.closure_available() {
            engine.next_closure()?;
            engine.commit();

            let year = CaptureRule::new().regex(r"^\d{4}$")?;
            if engine.capture_closure("year", year).execute()? {
                engine.commit();
                continue;
            }

            while engine.fragment_available() {
                if Self::attempt(engine, "identifier", r"^S(?P<season>\d+)E(?P<episode>\d+)$")? {
                    continue;
                }
                if Self::attempt(engine, "quality", r"^\d{3,4}p$")? {
                    continue;
                }
                engine.next_fragment()?;
                let name = CaptureRule::new().single(false);
                engine.capture_fragment("show_name", name).execute()?;
                engine.commit();
            }
        }

        Ok(engine.take_result())
    }
}

#[test]
fn test_release_grammar_captures() {
    let mut engine = Engine::new();
    let closures = closures_from_text(&["Show.Name.S01E02", "2013", "720p"]);
    let result = engine.run(&mut ReleaseGrammar, closures).unwrap();

    assert_eq!(result.heads().len(), 1);
    assert_eq!(result.heads()[0].closure.value, "Show.Name.S01E02");

    let captures = serde_json::to_string_pretty(&result.heads()[0].captures).unwrap();
    insta::assert_snapshot!(captures, @r###"
    {
      "identifier": {
        "episode": "02",
        "season": "01"
      },
      "quality": "720p",
      "show_name": [
        "Show",
        "Name"
      ],
      "year": "2013"
    }
    "###);
}

#[test]
fn test_engine_is_reusable_across_runs() {
    let mut engine = Engine::new();
    engine
        .run(&mut ReleaseGrammar, closures_from_text(&["First.S01E01"]))
        .unwrap();
    let result = engine
        .run(&mut ReleaseGrammar, closures_from_text(&["Second.1080p"]))
        .unwrap();

    assert!(result.get("identifier").is_none());
    assert_eq!(
        result
            .get("quality")
            .and_then(|v| v.last())
            .and_then(|c| c.as_text()),
        Some("1080p")
    );
}

#[test]
fn test_reject_policy_keeps_first_identifier() {
    let config = EngineConfig {
        single_policy: SinglePolicy::Reject,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config);
    let result = engine
        .run(&mut ReleaseGrammar, closures_from_text(&["Show.S01E01.S01E02"]))
        .unwrap();

    // the second identifier is rejected and falls through to the show name
    let identifier = result.get("identifier").and_then(|v| v.last()).unwrap();
    assert_eq!(identifier.group("episode"), Some("01"));
    assert_eq!(result.get("show_name").map(|v| v.len()), Some(2));
}

#[test]
fn test_grammar_over_loaded_closures() {
    let yaml = "
- value: Show.S02E10
  fragments:
    - value: Show
    - value: S02E10
";
    let closures = ClosureLoader::from_yaml_str(yaml).unwrap();
    let mut engine = Engine::new();
    let result = engine.run(&mut ReleaseGrammar, closures).unwrap();

    let identifier = result.get("identifier").and_then(|v| v.last()).unwrap();
    assert_eq!(identifier.group("season"), Some("02"));
    assert_eq!(identifier.group("episode"), Some("10"));
}

#[test]
fn test_cache_disabled_still_matches() {
    let config = EngineConfig {
        cache_matches: false,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config);
    engine.setup(closures_from_text(&["Show.720p"])).unwrap();
    engine.next_closure().unwrap();
    engine.next_fragment().unwrap();
    engine.next_fragment().unwrap();

    let rule = CaptureRule::new().regex(r"^\d{3,4}p$").unwrap();
    assert!(engine.capture_fragment("quality", rule).execute().unwrap());
    assert_eq!(engine.cached_matches(), 0);
}
