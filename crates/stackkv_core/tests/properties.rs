//! Property tests for the transaction stack.

use proptest::prelude::*;
use stackkv_core::{Command, CoreError, Reply, Session, TxStack};

#[derive(Debug, Clone)]
enum Op {
    Start,
    Commit,
    Abort,
    Write(String, String),
    Delete(String),
    Read(String),
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Start),
        1 => Just(Op::Commit),
        1 => Just(Op::Abort),
        3 => (key_strategy(), "[0-9]{1,3}").prop_map(|(k, v)| Op::Write(k, v)),
        1 => key_strategy().prop_map(Op::Delete),
        1 => key_strategy().prop_map(Op::Read),
    ]
}

fn apply(stack: &mut TxStack, op: &Op) {
    match op {
        Op::Start => {
            stack.push();
        }
        Op::Commit => {
            if stack.commit().is_ok() {
                stack.pop().unwrap();
            }
        }
        Op::Abort => {
            let _ = stack.pop();
        }
        Op::Write(k, v) => stack.set(k.as_str(), v.as_str()),
        Op::Delete(k) => {
            stack.delete(k);
        }
        Op::Read(k) => {
            let _ = stack.get(k);
        }
    }
}

proptest! {
    #[test]
    fn starts_without_commit_or_abort_count_depth(n in 0usize..64) {
        let mut stack = TxStack::new();
        for _ in 0..n {
            stack.push();
        }
        prop_assert_eq!(stack.depth(), n);
        prop_assert_eq!(stack.chain_len(), n);
    }

    #[test]
    fn depth_always_matches_parent_chain(ops in prop::collection::vec(op_strategy(), 0..128)) {
        let mut stack = TxStack::new();
        for op in &ops {
            apply(&mut stack, op);
            prop_assert_eq!(stack.depth(), stack.chain_len());
        }
    }

    #[test]
    fn abort_on_empty_stack_changes_nothing(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut stack = TxStack::new();
        for op in &ops {
            apply(&mut stack, op);
        }
        while stack.pop().is_ok() {}

        let before = stack.global().clone();
        prop_assert_eq!(stack.pop(), Err(CoreError::NoActiveTransaction));
        prop_assert_eq!(stack.depth(), 0);
        prop_assert_eq!(stack.global().len(), before.len());
        for (k, v) in before.iter() {
            prop_assert_eq!(stack.global().get(k), Some(v));
        }
    }

    #[test]
    fn commit_on_empty_stack_leaves_global_unchanged(
        pairs in prop::collection::vec((key_strategy(), "[a-z]{1,4}"), 0..16)
    ) {
        let mut stack = TxStack::new();
        for (k, v) in &pairs {
            stack.set(k.as_str(), v.as_str());
        }
        let before = stack.global().clone();

        prop_assert_eq!(stack.commit(), Err(CoreError::NothingToCommit));
        prop_assert_eq!(stack.global().len(), before.len());
        for (k, v) in before.iter() {
            prop_assert_eq!(stack.global().get(k), Some(v));
        }
    }

    #[test]
    fn committed_write_lands_in_global(key in key_strategy(), value in "[a-z0-9]{1,8}") {
        let session = Session::new();
        session.execute(Command::Start);
        session.execute(Command::Write { key: key.clone(), value: value.clone() });
        session.execute(Command::Commit);

        let global = session.global_snapshot();
        prop_assert_eq!(session.depth(), 0);
        prop_assert_eq!(global.get(&key), Some(value.as_str()));
    }

    #[test]
    fn aborted_write_never_lands(key in key_strategy(), value in "[a-z0-9]{1,8}") {
        let session = Session::new();
        session.execute(Command::Start);
        session.execute(Command::Write { key: key.clone(), value });
        session.execute(Command::Abort);

        prop_assert_eq!(session.depth(), 0);
        prop_assert!(!session.global_snapshot().contains(&key));
        prop_assert_eq!(session.execute(Command::Read { key: key.clone() }), Reply::NotSet(key));
    }

    #[test]
    fn fresh_transaction_sees_nothing(
        pairs in prop::collection::vec((key_strategy(), "[a-z]{1,4}"), 0..16),
        probe in key_strategy(),
    ) {
        let mut stack = TxStack::new();
        for (k, v) in &pairs {
            stack.set(k.as_str(), v.as_str());
        }
        stack.push();
        for (k, v) in &pairs {
            stack.set(k.as_str(), v.as_str());
        }
        stack.push();
        prop_assert_eq!(stack.get(&probe), None);
    }

    #[test]
    fn no_arg_commands_reject_trailing_argument(
        verb in prop::sample::select(vec!["START", "COMMIT", "ABORT", "QUIT"]),
        arg in "[a-z0-9]{1,6}",
    ) {
        let session = Session::new();
        session.start();
        let reply = session.execute_line(&format!("{verb} {arg}"));
        prop_assert!(matches!(reply, Some(Reply::Rejected(_))));
        prop_assert_eq!(session.depth(), 1);
    }
}
