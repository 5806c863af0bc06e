use cockpit_core::{
    category_bonus, objectives_in, total_bonus, BusinessUnit, NoteKey, Objective,
    ObjectiveCategory, Period,
};
use std::collections::BTreeMap;

const EPSILON: f64 = 1e-9;

fn notes_for(category: ObjectiveCategory, period: Period, value: f64) -> BTreeMap<String, f64> {
    objectives_in(category)
        .into_iter()
        .map(|objective| (NoteKey::new(objective.id, period).storage_key(), value))
        .collect()
}

#[test]
fn perfect_notes_give_full_category_bonus() {
    for category in ObjectiveCategory::ALL {
        let notes = notes_for(category, Period::FirstHalf, 10.0);
        let bonus = category_bonus(objectives_in(category), Period::FirstHalf, &notes);
        assert!((bonus - 10.0).abs() < EPSILON, "{category:?} gave {bonus}");
    }
}

#[test]
fn zero_or_absent_notes_give_no_bonus() {
    let zeros = notes_for(ObjectiveCategory::Personal, Period::SecondHalf, 0.0);
    let personal = objectives_in(ObjectiveCategory::Personal);
    assert_eq!(category_bonus(personal.clone(), Period::SecondHalf, &zeros), 0.0);
    assert_eq!(
        category_bonus(personal, Period::SecondHalf, &BTreeMap::new()),
        0.0
    );
}

#[test]
fn single_objective_contribution_matches_weight() {
    let objective = Objective {
        id: "obj-20",
        name: "Twenty",
        organizational_unit: BusinessUnit::Operations,
        weight_percent: 20.0,
        category: ObjectiveCategory::Project,
    };
    let mut notes = BTreeMap::new();
    notes.insert(
        NoteKey::new("obj-20", Period::FirstHalf).storage_key(),
        8.0,
    );

    let bonus = category_bonus([&objective], Period::FirstHalf, &notes);
    assert!((bonus - 1.6).abs() < EPSILON, "got {bonus}");
}

#[test]
fn periods_are_evaluated_independently() {
    let notes = notes_for(ObjectiveCategory::Project, Period::FirstHalf, 10.0);
    let first = total_bonus(Period::FirstHalf, &notes);
    let second = total_bonus(Period::SecondHalf, &notes);

    assert!((first.project - 10.0).abs() < EPSILON);
    assert_eq!(first.personal, 0.0);
    assert!((first.total - 10.0).abs() < EPSILON);
    assert_eq!(second.total, 0.0);
}

#[test]
fn partial_notes_stay_strictly_inside_bounds() {
    let mut notes = notes_for(ObjectiveCategory::Personal, Period::FirstHalf, 10.0);
    let first_id = objectives_in(ObjectiveCategory::Personal)[0].id;
    notes.insert(NoteKey::new(first_id, Period::FirstHalf).storage_key(), 9.0);

    let bonus = total_bonus(Period::FirstHalf, &notes).personal;
    assert!(bonus > 0.0 && bonus < 10.0, "got {bonus}");
}
