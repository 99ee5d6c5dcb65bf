use std::sync::{Arc, Mutex};
use std::time::Duration;

use services::{
    AppServices, OptionMark, QuestionDraft, QuizCountdown, QuizPager, QuizPhase, QuizReview,
    QuizSetup,
};
use quiz_core::time::{fixed_clock, fixed_now};

fn draft(text: &str, correct: usize) -> QuestionDraft {
    QuestionDraft::new(
        text,
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct,
    )
}

async fn advance_secs(secs: u64) {
    // let the countdown task run once so its interval anchors before time
    // moves
    tokio::task::yield_now().await;
    for _ in 0..secs {
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn authored_questions_flow_into_a_scored_quiz() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();

    let s1 = services.sections().add_section("Algebra").await.unwrap();
    let s2 = services.sections().add_section("Geometry").await.unwrap();
    services.sections().set_last_section(&s2).await.unwrap();

    for text in ["A1", "A2", "A3"] {
        services.questions().add_question(&s1, draft(text, 2)).await.unwrap();
    }
    for text in ["B1", "B2"] {
        services.questions().add_question(&s2, draft(text, 2)).await.unwrap();
    }

    let mut setup = QuizSetup::default();
    setup.select_section(s1);
    setup.select_section(s2);
    setup.set_requested_count(4);

    let mut session = services.quiz().start_quiz(&setup).await.unwrap();
    assert_eq!(session.total(), 4);
    assert_eq!(session.phase(), QuizPhase::InProgress);

    // answer everything correctly, then submit
    for index in 0..session.total() {
        session.select_answer(index, 2);
    }
    session.submit(fixed_now());

    assert_eq!(session.phase(), QuizPhase::Finished);
    assert_eq!(session.score(), 4);

    let review = QuizReview::of(&session).unwrap();
    assert_eq!(review.score, 4);
    assert!(review
        .questions
        .iter()
        .all(|q| q.marks[2] == OptionMark::SelectedCorrect));

    // restarting keeps the selection but nothing of the old attempt
    let again = services
        .quiz()
        .start_quiz(&session.restart_setup())
        .await
        .unwrap();
    assert_eq!(again.score(), 0);
    assert_eq!(again.answered_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn countdown_expiry_finishes_an_unanswered_quiz() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();

    let section = services.sections().add_section("Algebra").await.unwrap();
    services
        .questions()
        .add_question(&section, draft("A1", 0))
        .await
        .unwrap();

    let mut setup = QuizSetup::default();
    setup.select_section(section);
    setup.set_requested_count(1);
    setup.set_time_limit_secs(1);

    let session = services.quiz().start_quiz(&setup).await.unwrap();
    let session = Arc::new(Mutex::new(session));
    let countdown = QuizCountdown::spawn(session.clone(), fixed_clock());

    advance_secs(2).await;

    let session = session.lock().unwrap();
    assert_eq!(session.phase(), QuizPhase::Finished);
    assert_eq!(session.score(), 0);
    assert!(countdown.is_stopped());
}

#[tokio::test]
async fn pagination_walks_the_sampled_questions() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();

    let section = services.sections().add_section("Algebra").await.unwrap();
    for i in 0..7 {
        services
            .questions()
            .add_question(&section, draft(&format!("Q{i}"), 0))
            .await
            .unwrap();
    }

    let mut setup = QuizSetup::default();
    setup.select_section(section);
    setup.set_requested_count(7);

    let session = services.quiz().start_quiz(&setup).await.unwrap();
    let mut pager = QuizPager::default();

    let mut seen = Vec::new();
    loop {
        seen.extend(pager.page(session.questions()).iter().map(|q| q.text().to_owned()));
        if !pager.has_next(session.total()) {
            break;
        }
        pager.next(session.total());
    }

    assert_eq!(seen.len(), 7);
    assert_eq!(pager.current_page(), 2);
}
