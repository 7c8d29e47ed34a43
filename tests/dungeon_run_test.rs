//! Integration test: complete dungeon run through the session
//!
//! Tests the full flow: hire → enter → springs → midboss → final boss → clear

use command_rpg::battle::{select_first_alive, Winner};
use command_rpg::core::{BattleCommand, EventResponse, GameSession, Mode};
use command_rpg::dungeon::{Direction, EventKind};
use command_rpg::units::{FINAL_BOSS_ID, MID_BOSS_ID};
use rand::rngs::mock::StepRng;

/// Encounter and item rolls never fire, so only fixed events happen.
fn quiet() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn hired_party() -> GameSession {
    let mut session = GameSession::new();
    for id in ["warrior", "monk", "mage"] {
        session.hire(id).unwrap();
    }
    session
}

/// Basic attacks on the first living enemy until the battle ends.
fn fight_it_out(session: &mut GameSession) -> Option<Winner> {
    for _ in 0..200 {
        let report = if session.is_ally_turn() {
            let battle = session.state().battle().unwrap();
            let target = select_first_alive(&battle.enemies).unwrap();
            session
                .ally_action(BattleCommand::Attack { target })
                .unwrap()
        } else {
            session.run_enemy_turn().unwrap()
        };
        if report.status.over {
            return report.status.winner;
        }
    }
    panic!("battle did not finish");
}

fn walk_to(session: &mut GameSession, step: u32) -> Option<EventKind> {
    let mut last = None;
    while session.state().dungeon().unwrap().step < step {
        last = session
            .move_in_dungeon(Direction::Forward, &mut quiet())
            .unwrap()
            .event;
    }
    last
}

#[test]
fn test_full_party_clears_dungeon() {
    let mut session = hired_party();
    session.enter_dungeon().unwrap();

    assert_eq!(walk_to(&mut session, 5), Some(EventKind::Water));
    session.respond_to_event(EventResponse::Camp).unwrap();

    assert_eq!(walk_to(&mut session, 10), Some(EventKind::MidBoss));
    assert_eq!(
        session.state().event().unwrap().enemy.as_ref().unwrap().id,
        MID_BOSS_ID
    );
    session.respond_to_event(EventResponse::Fight).unwrap();
    assert_eq!(fight_it_out(&mut session), Some(Winner::Allies));

    // midboss victory goes back to the path, wounds carried over
    assert_eq!(session.state().mode, Mode::Field);
    assert_eq!(session.state().dungeon().unwrap().step, 10);
    assert_eq!(session.state().party.hero.hp, 18);

    assert_eq!(walk_to(&mut session, 15), Some(EventKind::Water));
    session.respond_to_event(EventResponse::Camp).unwrap();
    assert_eq!(session.state().party.hero.hp, 40);

    assert_eq!(walk_to(&mut session, 20), Some(EventKind::FinalBoss));
    session.respond_to_event(EventResponse::Fight).unwrap();
    assert_eq!(
        session.state().battle().unwrap().enemies[0].id,
        FINAL_BOSS_ID
    );
    assert_eq!(fight_it_out(&mut session), Some(Winner::Allies));
    assert_eq!(session.state().mode, Mode::Clear);
}

#[test]
fn test_lone_hero_dies_to_midboss() {
    let mut session = GameSession::new();
    session.enter_dungeon().unwrap();
    walk_to(&mut session, 5);
    session.respond_to_event(EventResponse::Continue).unwrap();
    walk_to(&mut session, 10);
    session.respond_to_event(EventResponse::Fight).unwrap();

    assert_eq!(fight_it_out(&mut session), Some(Winner::Enemies));
    assert_eq!(session.state().mode, Mode::GameOver);
    assert!(session.state().party.is_wiped());
}

#[test]
fn test_spring_triggers_again_on_revisit() {
    let mut session = GameSession::new();
    session.enter_dungeon().unwrap();
    walk_to(&mut session, 5);
    session.respond_to_event(EventResponse::Continue).unwrap();

    session
        .move_in_dungeon(Direction::Forward, &mut quiet())
        .unwrap();
    let back = session
        .move_in_dungeon(Direction::Backward, &mut quiet())
        .unwrap();
    assert_eq!(back.step, 5);
    assert_eq!(back.event, Some(EventKind::Water));
}

#[test]
fn test_walk_back_out_of_the_dungeon() {
    let mut session = GameSession::new();
    session.enter_dungeon().unwrap();
    walk_to(&mut session, 3);
    for _ in 0..3 {
        session
            .move_in_dungeon(Direction::Backward, &mut quiet())
            .unwrap();
    }
    let visited = &session.state().dungeon().unwrap().visited_steps;
    assert_eq!(visited.len(), 4);
    session.return_to_town().unwrap();
    assert!(session.state().in_town());
}
