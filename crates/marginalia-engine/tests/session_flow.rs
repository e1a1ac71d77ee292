use std::cell::RefCell;
use std::rc::Rc;

use marginalia_engine::highlight::presets;
use marginalia_engine::{
    Command, ComponentId, EditEvent, EditorSession, LayoutConfig, Modifiers, Point, PointerEvent,
    SessionChange, Span, TextEdit,
};
use pretty_assertions::assert_eq;

const RECIPE: &str = "200g dark chocolate\n100 g butter\n3 eggs";

fn session() -> EditorSession {
    EditorSession::new(RECIPE, presets::recipe().unwrap(), LayoutConfig::default())
}

fn place_highlights(session: &mut EditorSession, rule: &str, x: f64) -> Vec<ComponentId> {
    let ids: Vec<_> = session.highlights().by_rule(rule).map(|h| h.id).collect();
    ids.into_iter()
        .enumerate()
        .map(|(i, highlight)| {
            session
                .execute(Command::PlaceHighlight {
                    highlight,
                    position: Point::new(x, i as f64 * 60.0),
                })
                .unwrap()
                .unwrap()
        })
        .collect()
}

fn drag(session: &mut EditorSession, target: ComponentId, from: Point, to: Point) {
    session.handle_pointer(PointerEvent::start(from, Some(target)));
    session.handle_pointer(PointerEvent::moved(to, to - from));
    session.handle_pointer(PointerEvent::end(to));
}

#[test]
fn annotations_follow_the_text_through_edits() {
    let mut session = session();
    let ingredients = place_highlights(&mut session, presets::INGREDIENT, 0.0);
    assert_eq!(ingredients.len(), 3);

    let event = EditEvent::new(vec![
        TextEdit::replace(0, 4, "250 g"),
        TextEdit::insert(20, "50 g cocoa powder\n"),
    ])
    .with_result("250 g dark chocolate\n50 g cocoa powder\n100 g butter\n3 eggs");
    session.apply_edit(event).unwrap();

    let texts: Vec<String> = ingredients
        .iter()
        .map(|id| session.annotation_text(*id).unwrap())
        .collect();
    assert_eq!(texts, vec!["dark chocolate", "butter", "eggs"]);

    let lines: Vec<String> = session
        .highlights()
        .by_rule(presets::INGREDIENT_LINE)
        .map(|h| session.span_text(h.span).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec!["250 g dark chocolate", "50 g cocoa powder", "100 g butter"]
    );
}

#[test]
fn deleting_an_annotated_word_collapses_its_span() {
    let mut session = session();
    let ingredients = place_highlights(&mut session, presets::INGREDIENT, 0.0);
    let butter = ingredients[1];

    session
        .apply_edit(EditEvent::new(vec![TextEdit::delete(26, 32)]))
        .unwrap();

    let span = session.canvas().annotation(butter).unwrap().span;
    assert_eq!(span, Span::empty(26));
    assert_eq!(session.annotation_text(butter).as_deref(), Some(""));
}

#[test]
fn arrange_annotations_into_group_and_stack() {
    let mut session = session();
    let quantities = place_highlights(&mut session, presets::QUANTITY, 0.0);
    let ingredients = place_highlights(&mut session, presets::INGREDIENT, 400.0);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    session.subscribe(move |change: &SessionChange| sink.borrow_mut().push(*change));

    // rectangle-select the quantity column and group it
    session.handle_pointer(PointerEvent::start(Point::new(-10.0, -10.0), None));
    session.handle_pointer(PointerEvent::moved(
        Point::new(100.0, 200.0),
        Point::new(110.0, 210.0),
    ));
    session.handle_pointer(PointerEvent::end(Point::new(100.0, 200.0)));
    assert_eq!(
        session.selection().in_canvas_order(session.canvas()),
        quantities
    );
    let group = session.execute(Command::GroupSelection).unwrap().unwrap();
    assert_eq!(session.canvas().members_of(group), Some(quantities.as_slice()));

    // drop the first ingredient onto the group
    let eggs = ingredients[2];
    drag(&mut session, ingredients[0], Point::new(400.0, 0.0), Point::new(10.0, 10.0));
    let members = session.canvas().members_of(group).unwrap().to_vec();
    assert_eq!(members.last(), Some(&ingredients[0]));

    // stack the remaining loose ingredients
    session.select([ingredients[1], eggs]);
    let stack = session
        .execute(Command::CreateStackFromSelection)
        .unwrap()
        .unwrap();
    let created = session.canvas().find(stack).unwrap().as_stack().unwrap();
    assert_eq!(created.position, Point::new(400.0, 60.0));
    assert!(!created.is_expanded);
    assert_eq!(created.annotations.len(), 2);
    assert_eq!(session.canvas().len(), 1 + members.len() + 1);

    assert!(changes.borrow().contains(&SessionChange::DragHover));
    assert_eq!(changes.borrow().last(), Some(&SessionChange::Selection));
}

#[test]
fn extracting_and_cancelling_leaves_group_untouched() {
    let mut session = session();
    let quantities = place_highlights(&mut session, presets::QUANTITY, 0.0);
    session.select(quantities.clone());
    let group = session.execute(Command::GroupSelection).unwrap().unwrap();
    let before: Vec<_> = session.canvas().iter().cloned().collect();

    session.handle_pointer(
        PointerEvent::start(Point::new(5.0, 45.0), Some(quantities[1]))
            .with_modifiers(Modifiers { extract: true }),
    );
    session.handle_pointer(PointerEvent::moved(
        Point::new(300.0, 300.0),
        Point::new(295.0, 255.0),
    ));
    assert_eq!(session.canvas().members_of(group), Some(&[quantities[0]][..]));
    session.handle_pointer(PointerEvent::cancel(Point::new(300.0, 300.0)));

    let after: Vec<_> = session.canvas().iter().cloned().collect();
    assert_eq!(after, before);
    assert!(session.drag_state().is_none());
}
