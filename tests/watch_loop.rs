use std::error::Error;
use std::sync::Arc;

use kigo::engine::{shutdown_channel, CycleAction, CycleReport, LoopPhase, WatchLoop, WatchState};
use kigo::errors::KigoError;
use kigo::fs::mock::MockFileSystem;
use kigo::watch::ChangeDetector;
use kigo_test_utils::builders::WatchConfigBuilder;
use kigo_test_utils::fake_executor::FakeExecutor;
use kigo_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn first_cycle_is_discarded_even_when_empty() {
    let mut state = WatchState::new();
    assert_eq!(state.phase(), LoopPhase::Startup);

    assert_eq!(
        state.on_cycle(Vec::new()),
        CycleAction::DiscardBaseline { tracked: 0 }
    );
    assert_eq!(state.phase(), LoopPhase::Steady);
}

#[test]
fn steady_state_runs_only_on_changes() {
    let mut state = WatchState::new();
    assert_eq!(
        state.on_cycle(strings(&["a.txt", "b.txt"])),
        CycleAction::DiscardBaseline { tracked: 2 }
    );

    assert_eq!(state.on_cycle(Vec::new()), CycleAction::Idle);
    assert_eq!(
        state.on_cycle(strings(&["a.txt"])),
        CycleAction::RunCommands(strings(&["a.txt"]))
    );
    assert_eq!(state.phase(), LoopPhase::Steady);
    assert_eq!(state.cycles(), 3);
}

fn mock_tree() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("./a.txt", b"alpha".to_vec());
    fs.add_file("./b.txt", b"beta".to_vec());
    fs.add_file("./notes.md", b"ignored".to_vec());
    fs
}

#[tokio::test]
async fn baseline_cycle_never_runs_commands() -> TestResult {
    init_tracing();

    let fs = mock_tree();
    let cfg = WatchConfigBuilder::new(".")
        .include("*.txt")
        .command("fmt <files>")
        .build();
    let fake = FakeExecutor::new();
    let executed = fake.executed();
    let (_shutdown, rx) = shutdown_channel();
    let mut watch = WatchLoop::new(cfg, ChangeDetector::new(Arc::new(fs)), fake, rx);

    let report = watch.run_cycle().await?;

    assert_eq!(report, CycleReport::Baseline { tracked: 2 });
    assert_eq!(watch.state().phase(), LoopPhase::Steady);
    assert_eq!(watch.state().cycles(), 1);
    assert!(executed.lock().unwrap().is_empty());
    assert_eq!(watch.detector().table().len(), 2);
    Ok(())
}

#[tokio::test]
async fn changes_after_baseline_trigger_commands_with_changed_files() -> TestResult {
    init_tracing();

    let fs = mock_tree();
    let cfg = WatchConfigBuilder::new(".")
        .include("*.txt")
        .command("fmt <files>")
        .command("check")
        .build();
    let fake = FakeExecutor::new();
    let executed = fake.executed();
    let (_shutdown, rx) = shutdown_channel();
    let mut watch = WatchLoop::new(cfg, ChangeDetector::new(Arc::new(fs.clone())), fake, rx);

    watch.run_cycle().await?;
    assert_eq!(watch.run_cycle().await?, CycleReport::Idle);

    fs.add_file("./b.txt", b"BETA".to_vec());
    fs.add_file("./c.txt", b"gamma".to_vec());
    fs.add_file("./notes.md", b"edited but not watched".to_vec());

    match watch.run_cycle().await? {
        CycleReport::Ran { changes, report } => {
            assert_eq!(changes, strings(&["b.txt", "c.txt"]));
            assert!(!report.interrupted);
            assert_eq!(report.outcomes.len(), 2);
        }
        other => panic!("expected commands to run, got {other:?}"),
    }

    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 2);
    assert_eq!(executed[0].program, "fmt");
    assert_eq!(executed[0].args, strings(&["b.txt", "c.txt"]));
    assert_eq!(executed[1].program, "check");
    Ok(())
}

#[tokio::test]
async fn command_failure_does_not_stop_the_loop() -> TestResult {
    init_tracing();

    let fs = mock_tree();
    let cfg = WatchConfigBuilder::new(".")
        .include("*.txt")
        .command("broken")
        .command("never")
        .build();
    let fake = FakeExecutor::new().failing("broken");
    let executed = fake.executed();
    let (_shutdown, rx) = shutdown_channel();
    let mut watch = WatchLoop::new(cfg, ChangeDetector::new(Arc::new(fs.clone())), fake, rx);

    watch.run_cycle().await?;

    fs.add_file("./a.txt", b"changed once".to_vec());
    match watch.run_cycle().await? {
        CycleReport::Ran { report, .. } => assert!(report.interrupted),
        other => panic!("expected commands to run, got {other:?}"),
    }

    fs.add_file("./a.txt", b"changed twice".to_vec());
    assert!(matches!(watch.run_cycle().await?, CycleReport::Ran { .. }));

    let programs: Vec<String> = executed
        .lock()
        .unwrap()
        .iter()
        .map(|i| i.program.clone())
        .collect();
    assert_eq!(programs, strings(&["broken", "broken"]));
    Ok(())
}

#[tokio::test]
async fn detection_error_is_returned_from_the_cycle() {
    init_tracing();

    let fs = mock_tree();
    let cfg = WatchConfigBuilder::new(".")
        .include("*.txt")
        .command("fmt")
        .build();
    let (_shutdown, rx) = shutdown_channel();
    let mut watch = WatchLoop::new(
        cfg,
        ChangeDetector::new(Arc::new(fs.clone())),
        FakeExecutor::new(),
        rx,
    );

    fs.add_unreadable("./a.txt");
    let err = watch.run_cycle().await.unwrap_err();
    assert!(matches!(err, KigoError::Hash { .. }));
}

#[tokio::test]
async fn run_stops_at_the_checkpoint_before_walking() {
    init_tracing();

    // The root does not exist: any walk would fail, so a clean exit proves
    // the shutdown request was honoured before detection started.
    let cfg = WatchConfigBuilder::new("/definitely/not/a/root")
        .include("*")
        .command("fmt")
        .interval(0)
        .build();
    let fake = FakeExecutor::new();
    let executed = fake.executed();
    let (shutdown, rx) = shutdown_channel();
    let watch = WatchLoop::new(cfg, ChangeDetector::real(), fake, rx);

    shutdown.request();
    let result = with_timeout(watch.run()).await;

    assert!(result.is_ok(), "{result:?}");
    assert!(executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn run_fails_when_detection_fails() {
    init_tracing();

    let cfg = WatchConfigBuilder::new("/definitely/not/a/root")
        .include("*")
        .build();
    let (_shutdown, rx) = shutdown_channel();
    let watch = WatchLoop::new(cfg, ChangeDetector::real(), FakeExecutor::new(), rx);

    let result = with_timeout(watch.run()).await;
    assert!(matches!(result, Err(KigoError::Walk { .. })));
}
