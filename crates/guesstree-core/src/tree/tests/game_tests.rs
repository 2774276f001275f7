use crate::{
    DecisionTree, GameError, GameEvent, GameOutcome, LoadStatus, NodeRecord, Phase,
    tree::tests::RecordingStore,
};

fn question(text: &str) -> GameEvent {
    GameEvent::Question(text.to_string())
}

#[test]
fn empty_store_starts_from_seed_tree() {
    let store = RecordingStore::default();
    let tree = DecisionTree::new(&store);

    assert_eq!(tree.load_status(), &LoadStatus::Seeded);
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.item_count(), 2);
    assert_eq!(tree.phase(), Phase::Idle);
    assert_eq!(tree.cursor(), None);
    // nothing is written until the tree changes
    assert_eq!(store.saves.get(), 0);
}

#[test]
fn seed_game_walks_to_a_guess() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);

    let first = tree.start_game().expect("start should succeed");
    assert_eq!(first, question("Is it edible?"));
    assert_eq!(tree.cursor(), Some(tree.root_id()));

    let guess = tree.submit_answer(true).expect("answer should succeed");
    assert_eq!(guess, question("Is it Chocolate?"));

    let over = tree.submit_answer(true).expect("answer should succeed");
    assert_eq!(
        over,
        GameEvent::GameOver {
            outcome: GameOutcome::Guessed,
            message: "Hooray, I guessed it!".to_string(),
        }
    );
    assert_eq!(tree.phase(), Phase::Guessed);
}

#[test]
fn confirmed_guess_leaves_tree_untouched() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);
    let before = tree.snapshot().expect("snapshot");

    tree.start_game().expect("start");
    tree.submit_answer(false).expect("answer");
    tree.submit_answer(true).expect("answer");

    assert_eq!(tree.snapshot().expect("snapshot"), before);
    assert_eq!(store.saves.get(), 0);
}

#[test]
fn rejected_guess_waits_for_learning() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);

    tree.start_game().expect("start");
    tree.submit_answer(false).expect("answer");
    let over = tree.submit_answer(false).expect("answer");

    assert_eq!(
        over,
        GameEvent::GameOver {
            outcome: GameOutcome::GaveUp,
            message: "I give up. What were you thinking of?".to_string(),
        }
    );
    let flowers = tree
        .node(tree.root_id())
        .expect("root")
        .no()
        .expect("no branch");
    assert_eq!(tree.phase(), Phase::Learning(flowers));

    let err = tree.submit_answer(true).expect_err("answers are refused");
    assert!(matches!(err, GameError::LearningPending));
    assert_eq!(tree.phase(), Phase::Learning(flowers));
}

#[test]
fn answer_without_game_is_rejected_without_change() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);
    let before = tree.snapshot().expect("snapshot");

    let err = tree.submit_answer(true).expect_err("no game yet");

    assert!(matches!(err, GameError::NoActiveGame));
    assert!(err.is_usage_error());
    assert_eq!(tree.phase(), Phase::Idle);
    assert_eq!(tree.snapshot().expect("snapshot"), before);
}

#[test]
fn answer_after_win_is_rejected() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);

    tree.start_game().expect("start");
    tree.submit_answer(true).expect("answer");
    tree.submit_answer(true).expect("answer");

    let err = tree.submit_answer(false).expect_err("game is over");
    assert!(matches!(err, GameError::GameFinished));
}

#[test]
fn start_game_restarts_from_root_at_any_point() {
    let store = RecordingStore::default();
    let mut tree = DecisionTree::new(&store);

    tree.start_game().expect("start");
    tree.submit_answer(true).expect("answer");
    tree.submit_answer(false).expect("answer");

    let again = tree.start_game().expect("restart");
    assert_eq!(again, question("Is it edible?"));
    assert_eq!(tree.phase(), Phase::Asking(tree.root_id()));
}

#[test]
fn restored_tree_is_used_for_play() {
    let record = NodeRecord::question(
        "Does it fly?",
        NodeRecord::leaf("a kite"),
        NodeRecord::question("Is it alive?", NodeRecord::leaf("a cat"), NodeRecord::leaf("a rock")),
    );
    let store = RecordingStore::with(record.clone());
    let mut tree = DecisionTree::new(&store);

    assert_eq!(tree.load_status(), &LoadStatus::Restored);
    assert_eq!(tree.snapshot().expect("snapshot"), record);

    tree.start_game().expect("start");
    assert_eq!(tree.submit_answer(false).expect("answer"), question("Is it alive?"));
    assert_eq!(tree.submit_answer(false).expect("answer"), question("Is it a rock?"));
}

#[test]
fn knowledge_base_event_lists_every_node() {
    let store = RecordingStore::default();
    let tree = DecisionTree::new(&store);

    let GameEvent::KnowledgeBase(lines) = tree.show_knowledge_base() else {
        panic!("expected a knowledge base event");
    };
    assert_eq!(lines.len(), tree.node_count());
    assert_eq!(tree.show_knowledge_base().message(), None);
}
