//! Property-based tests for the checkpoint engine
//!
//! Random walks over random closure shapes. A simple model tracks where the last checkpoint
//! is; the engine must agree with it after every operation.

use proptest::prelude::*;
use tagwalk::walk::history::Position;
use tagwalk::{Closure, Engine};

#[derive(Debug, Clone, Copy)]
enum Op {
    NextClosure,
    NextFragment,
    Commit,
    Rewind,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::NextClosure),
        5 => Just(Op::NextFragment),
        1 => Just(Op::Commit),
        1 => Just(Op::Rewind),
    ]
}

/// Fragment counts per closure; closures may be empty
fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 1..6)
}

fn closures_for(shape: &[usize]) -> Vec<Closure> {
    shape
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let values: Vec<String> = (0..*count).map(|i| format!("c{}f{}", index, i)).collect();
            Closure::new(format!("c{}", index), &values).with_index(index)
        })
        .collect()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_rewind_restores_checkpoint(
            shape in shape_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..60),
        ) {
            let mut engine = Engine::new();
            engine.setup(closures_for(&shape)).unwrap();
            let mut checkpoint = Position::START;

            for op in ops {
                match op {
                    Op::NextClosure => {
                        if !engine.closure_available() {
                            prop_assert!(engine.next_closure().is_err());
                            continue;
                        }
                        let before = engine.closure_index();
                        engine.next_closure().unwrap();
                        prop_assert_eq!(engine.closure_index(), before + 1);
                        prop_assert_eq!(engine.fragment_index(), -1);
                        prop_assert_eq!(
                            engine.fragment_available(),
                            shape[engine.closure_index() as usize] > 0
                        );
                        // entering the first closure is part of the run's start
                        if before == -1 {
                            checkpoint = Position::new(0, -1);
                        }
                    }
                    Op::NextFragment => {
                        if !engine.fragment_available() {
                            let before = engine.position();
                            prop_assert!(engine.next_fragment().is_err());
                            prop_assert_eq!(engine.position(), before);
                            continue;
                        }
                        let before = engine.fragment_index();
                        engine.next_fragment().unwrap();
                        prop_assert_eq!(engine.fragment_index(), before + 1);
                    }
                    Op::Commit => {
                        engine.commit();
                        checkpoint = engine.position();
                    }
                    Op::Rewind => {
                        engine.rewind();
                        prop_assert_eq!(engine.position(), checkpoint);
                    }
                }
                prop_assert_eq!(engine.checkpoint(), checkpoint);
            }

            engine.rewind();
            prop_assert_eq!(engine.position(), checkpoint);
        }

        #[test]
        fn test_rewind_after_commit_is_noop(
            shape in shape_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut engine = Engine::new();
            engine.setup(closures_for(&shape)).unwrap();

            for op in ops {
                match op {
                    Op::NextClosure if engine.closure_available() => {
                        engine.next_closure().unwrap();
                    }
                    Op::NextFragment if engine.fragment_available() => {
                        engine.next_fragment().unwrap();
                    }
                    _ => {}
                }
            }

            engine.commit();
            let committed = engine.position();
            engine.rewind();
            prop_assert_eq!(engine.position(), committed);
            prop_assert!(engine.history().is_empty());
        }
    }
}
