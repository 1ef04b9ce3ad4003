use mobtrack::dice::Term;
use mobtrack::{Dice, DiceError, DiceExpr, DiceResolver};

#[test]
fn parses_dice_and_modifiers() {
    let expr = DiceExpr::parse("2d6+3").unwrap();
    let terms: Vec<_> = expr.terms().collect();
    assert_eq!(
        terms,
        vec![(1, Term::Dice { count: 2, sides: 6 }), (1, Term::Flat(3))]
    );
    assert_eq!(expr.eval(|_| 1).unwrap(), 5);
}

#[test]
fn bare_die_and_subtraction() {
    let expr = DiceExpr::parse(" d20 - 1d4 - 2 ").unwrap();
    // every die shows its maximum
    assert_eq!(expr.eval(|sides| sides as i32).unwrap(), 20 - 4 - 2);
}

#[test]
fn constants_are_expressions_too() {
    assert_eq!(DiceExpr::parse("27").unwrap().eval(|_| 0).unwrap(), 27);
    assert_eq!(DiceExpr::parse("-3").unwrap().eval(|_| 0).unwrap(), -3);
}

#[test]
fn malformed_expressions_are_rejected() {
    assert_eq!(DiceExpr::parse("   "), Err(DiceError::Empty));
    for bad in ["2d", "d", "abc", "2d6+", "1d6++2", "2x6", "1.5d6"] {
        assert!(
            matches!(DiceExpr::parse(bad), Err(DiceError::Malformed { .. })),
            "{} should be malformed",
            bad
        );
    }
    assert_eq!(DiceExpr::parse("0d6"), Err(DiceError::OutOfRange(0, 6)));
    assert_eq!(DiceExpr::parse("2d0"), Err(DiceError::OutOfRange(2, 0)));
}

#[test]
fn seeded_rolls_stay_in_bounds() {
    let mut dice = Dice::from_seed(42);
    for _ in 0..200 {
        let r = dice.roll("2d6").unwrap();
        assert!((2..=12).contains(&r));
        let f = dice.d6();
        assert!((1..=6).contains(&f));
    }
}

#[test]
fn same_seed_same_rolls() {
    let mut a = Dice::from_seed(2025);
    let mut b = Dice::from_seed(2025);
    let xs: Vec<_> = (0..10).map(|_| a.roll("3d8+1").unwrap()).collect();
    let ys: Vec<_> = (0..10).map(|_| b.roll("3d8+1").unwrap()).collect();
    assert_eq!(xs, ys);
}

#[test]
fn queued_totals_answer_valid_expressions_only() {
    let mut dice = Dice::from_seed(1);
    dice.queue_totals([9]);
    assert!(dice.roll("2d").is_err());
    // the failed roll did not eat the queued total
    assert_eq!(dice.roll("2d6").unwrap(), 9);
}

#[test]
fn queued_faces_come_first() {
    let mut dice = Dice::from_seed(1);
    dice.queue_faces([6, 1]);
    assert_eq!(dice.die(6), 6);
    assert_eq!(dice.die(6), 1);
    assert!((1..=6).contains(&dice.die(6)));
}
