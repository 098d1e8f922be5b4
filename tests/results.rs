//! Integration tests for result submission: duplicates, overwrite, doping and validation.

use field_day::{Game, Roster, Scoreboard, ScoreboardError, Submission};

fn scoreboard(n: u32) -> Scoreboard {
    let mut roster = Roster::new();
    for i in 1..=n {
        roster.register(format!("P{i}"), 10 + i).unwrap();
    }
    Scoreboard::new(roster)
}

fn rebus_key() -> Vec<String> {
    field_day::AnswerKeys::default().get(Game::Rebus).to_vec()
}

#[test]
fn duplicate_requires_overwrite() {
    let mut board = scoreboard(3);
    let first = board.submit(Submission::count(1, 40, false)).unwrap();
    assert!(!first.replaced);

    let before = board.clone();
    let err = board.submit(Submission::count(1, 55, false)).unwrap_err();
    assert_eq!(err, ScoreboardError::DuplicateExists);
    assert_eq!(board, before);
    assert_eq!(board.results().counts(Game::RopeSkipping)[&1], 40);

    let second = board
        .submit(Submission::count(1, 55, false).with_overwrite())
        .unwrap();
    assert!(second.replaced);
    assert_eq!(board.results().counts(Game::RopeSkipping)[&1], 55);
    assert_eq!(board.results().counts(Game::RopeSkipping).len(), 1);
}

#[test]
fn ordering_is_a_single_result_for_the_game() {
    let mut board = scoreboard(3);
    board.submit(Submission::ordering(vec![3, 1, 2], vec![])).unwrap();
    assert!(board.has_result(Game::MusicalChairs, 2));

    let err = board
        .submit(Submission::ordering(vec![1, 2, 3], vec![]))
        .unwrap_err();
    assert_eq!(err, ScoreboardError::DuplicateExists);
    assert_eq!(board.results().ordering(Game::MusicalChairs), Some(&[3, 1, 2][..]));

    board
        .submit(Submission::ordering(vec![1, 2, 3], vec![]).with_overwrite())
        .unwrap();
    assert_eq!(board.results().ordering(Game::MusicalChairs), Some(&[1, 2, 3][..]));
}

#[test]
fn ordering_must_be_a_permutation_of_the_roster() {
    let mut board = scoreboard(3);
    for ordering in [vec![1, 2], vec![1, 2, 2], vec![1, 2, 9], vec![1, 2, 3, 4]] {
        let err = board
            .submit(Submission::ordering(ordering, vec![]))
            .unwrap_err();
        assert_eq!(err, ScoreboardError::IncompleteOrdering);
    }
    assert!(board.results().is_empty());
}

#[test]
fn ordering_doping_players_must_be_in_the_ordering_and_unused() {
    let mut board = scoreboard(3);
    board.submit(Submission::count(2, 10, true)).unwrap();

    let err = board
        .submit(Submission::ordering(vec![1, 2, 3], vec![1, 2]))
        .unwrap_err();
    assert_eq!(
        err,
        ScoreboardError::DopingAlreadyUsed {
            player: 2,
            game: Game::RopeSkipping
        }
    );
    // Player 1 was valid but nothing is spent when the submission fails.
    assert_eq!(board.doping().is_used(1), None);
    assert_eq!(board.results().ordering(Game::MusicalChairs), None);

    board
        .submit(Submission::ordering(vec![1, 2, 3], vec![1, 1]))
        .unwrap();
    assert_eq!(board.doping().is_used(1), Some(Game::MusicalChairs));
}

#[test]
fn doping_is_usable_once_across_games() {
    let mut board = scoreboard(2);
    board.submit(Submission::count(1, 30, true)).unwrap();

    let err = board
        .submit(Submission::answers(Game::Rebus, 1, rebus_key(), 90.0, true))
        .unwrap_err();
    assert_eq!(
        err,
        ScoreboardError::DopingAlreadyUsed {
            player: 1,
            game: Game::RopeSkipping
        }
    );
    assert!(err.is_doping_error());
    assert!(!board.has_result(Game::Rebus, 1));
    assert_eq!(board.doping_usage().get(&1), Some(&Game::RopeSkipping));
}

#[test]
fn overwrite_keeps_doping_for_the_same_game() {
    let mut board = scoreboard(2);
    board.submit(Submission::count(1, 30, true)).unwrap();
    board
        .submit(Submission::count(1, 35, true).with_overwrite())
        .unwrap();
    board
        .submit(Submission::count(1, 36, false).with_overwrite())
        .unwrap();
    assert_eq!(board.doping().is_used(1), Some(Game::RopeSkipping));
}

#[test]
fn brain_games_are_graded_on_submission() {
    let mut board = scoreboard(2);
    let mut answers = rebus_key();
    answers[0] = "wrong".to_string();
    answers[4] = "DE ".to_string();
    let accepted = board
        .submit(Submission::answers(Game::Rebus, 2, answers, 123.5, false))
        .unwrap();
    let grade = accepted.grade.unwrap();
    assert_eq!(grade.correct, 9);
    assert_eq!(grade.questions, 10);
    assert_eq!(grade.time_seconds, 123.5);
    assert_eq!(board.results().answers(Game::Rebus)[&2].correct, 9);
}

#[test]
fn answer_key_update_applies_to_later_submissions() {
    let mut board = scoreboard(1);
    let key: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
    board.set_answer_key(Game::Maths, key.clone()).unwrap();
    let accepted = board
        .submit(Submission::answers(Game::Maths, 1, key, 60.0, false))
        .unwrap();
    assert_eq!(accepted.grade.unwrap().correct, 10);
}

#[test]
fn bracket_games_reject_direct_submission() {
    let mut board = scoreboard(2);
    let mut submission = Submission::count(1, 3, false);
    submission.game = Game::Kubb;
    assert!(matches!(
        board.submit(submission),
        Err(ScoreboardError::Validation(_))
    ));
}
