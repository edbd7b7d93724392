use anyhow::Result;
use common::Notifier;
use domain::{
    by_due_date, category_distribution, group_by_category, paginate, FilterSpec, Goal,
    InsertPosition, ListController, Priority, StatusFilter, Task, UNCATEGORIZED,
};
use storage::LocalStore;

fn fixture() -> Result<(LocalStore, Notifier)> {
    Ok((LocalStore::open_in_memory()?, Notifier::new()))
}

#[test]
fn add_assigns_id_and_survives_reload() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("mentalGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);

    let id = goals
        .add(&store, &mut notifier, Goal::new("Ligar para os pais"))
        .unwrap();
    assert!(!id.is_empty());

    let mut reloaded: ListController<Goal> =
        ListController::new("mentalGoals", InsertPosition::Head);
    reloaded.load(&store, &mut notifier);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(&id).unwrap().text, "Ligar para os pais");
    assert!(!reloaded.get(&id).unwrap().completed);
    assert!(notifier.is_empty());
    Ok(())
}

#[test]
fn goals_insert_newest_first() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("mentalGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);

    goals.add(&store, &mut notifier, Goal::new("primeiro")).unwrap();
    goals.add(&store, &mut notifier, Goal::new("segundo")).unwrap();
    assert_eq!(goals.items()[0].text, "segundo");
    assert_eq!(goals.items()[1].text, "primeiro");
    Ok(())
}

#[test]
fn add_rejects_blank_text_without_persisting() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("mentalGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);

    assert!(goals.add(&store, &mut notifier, Goal::new("   ")).is_err());
    assert!(goals.is_empty());
    assert_eq!(store.load::<Vec<Goal>>("mentalGoals")?, None);
    Ok(())
}

#[test]
fn toggle_twice_restores_original_state() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("socialGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);
    let id = goals.add(&store, &mut notifier, Goal::new("meta")).unwrap();

    assert!(goals.toggle_completed(&store, &mut notifier, &id));
    assert!(goals.get(&id).unwrap().completed);
    assert!(goals.toggle_completed(&store, &mut notifier, &id));
    assert!(!goals.get(&id).unwrap().completed);

    let stored: Vec<Goal> = store.load("socialGoals")?.unwrap();
    assert!(!stored[0].completed);
    Ok(())
}

#[test]
fn mutations_on_unknown_id_are_noops() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("familiarGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);
    goals.add(&store, &mut notifier, Goal::new("meta")).unwrap();
    let before = store.load::<Vec<Goal>>("familiarGoals")?.unwrap();

    assert!(!goals.toggle_completed(&store, &mut notifier, "nope"));
    assert!(!goals.remove(&store, &mut notifier, "nope"));
    assert!(!goals.update(&store, &mut notifier, "nope", |g| g.text.clear()));
    assert_eq!(goals.len(), 1);
    assert_eq!(store.load::<Vec<Goal>>("familiarGoals")?.unwrap(), before);
    assert!(notifier.is_empty());
    Ok(())
}

#[test]
fn remove_deletes_only_the_target() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let mut goals: ListController<Goal> = ListController::new("mentalGoals", InsertPosition::Head);
    goals.load(&store, &mut notifier);
    let keep = goals.add(&store, &mut notifier, Goal::new("fica")).unwrap();
    let gone = goals.add(&store, &mut notifier, Goal::new("sai")).unwrap();

    assert!(goals.remove(&store, &mut notifier, &gone));
    assert_eq!(goals.len(), 1);
    assert!(goals.get(&keep).is_some());
    Ok(())
}

fn task(title: &str, category: &str, due: &str, priority: Priority, completed: bool) -> Task {
    let mut t = Task::quick(title, category);
    t.due_date = due.to_string();
    t.priority = priority;
    t.completed = completed;
    t
}

fn seeded_tasks(store: &LocalStore, notifier: &mut Notifier) -> ListController<Task> {
    let mut tasks: ListController<Task> =
        ListController::new("tasksData", InsertPosition::Tail).with_sort(by_due_date);
    tasks.load(store, notifier);
    tasks
        .add(store, notifier, task("Correr", "Física", "2026-09-01", Priority::High, false))
        .unwrap();
    tasks
        .add(store, notifier, task("Meditar", "Mental", "2026-08-01", Priority::Low, true))
        .unwrap();
    tasks
        .add(store, notifier, task("Pagar contas", "Financeira", "2026-07-01", Priority::High, false))
        .unwrap();
    tasks
        .add(store, notifier, task("Sem prazo", "Mental", "", Priority::Medium, false))
        .unwrap();
    tasks
}

#[test]
fn default_filter_returns_everything_sorted_by_due_date() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let tasks = seeded_tasks(&store, &mut notifier);

    let view = tasks.filter(&FilterSpec::default(), "2026-08-29");
    assert_eq!(view.len(), tasks.len());
    let titles: Vec<&str> = view.iter().map(|t| t.title.as_str()).collect();
    // Undated tasks sort last.
    assert_eq!(titles, ["Pagar contas", "Meditar", "Correr", "Sem prazo"]);
    Ok(())
}

#[test]
fn filter_stages_compose() -> Result<()> {
    let (store, mut notifier) = fixture()?;
    let tasks = seeded_tasks(&store, &mut notifier);
    let today = "2026-08-29";

    let spec = FilterSpec {
        category: Some("Mental".to_string()),
        ..FilterSpec::default()
    };
    assert_eq!(tasks.filter(&spec, today).len(), 2);

    let spec = FilterSpec {
        search: "  PAGAR ".to_string(),
        ..FilterSpec::default()
    };
    let view = tasks.filter(&spec, today);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Pagar contas");

    let spec = FilterSpec {
        status: StatusFilter::Overdue,
        ..FilterSpec::default()
    };
    let view = tasks.filter(&spec, today);
    // Completed and undated tasks are never overdue.
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "Pagar contas");

    let spec = FilterSpec {
        status: StatusFilter::Priority(Priority::High),
        ..FilterSpec::default()
    };
    assert_eq!(tasks.filter(&spec, today).len(), 2);
    Ok(())
}

#[test]
fn pagination_clamps_and_reconstructs() -> Result<()> {
    let view: Vec<u32> = (0..25).collect();

    let p1 = paginate(&view, 10, 1);
    assert_eq!(p1.total_pages, 3);
    assert_eq!(p1.items.len(), 10);

    let p9 = paginate(&view, 10, 9);
    assert_eq!(p9.page, 3);
    assert_eq!(p9.items.len(), 5);

    let p0 = paginate(&view, 10, 0);
    assert_eq!(p0.page, 1);

    let mut joined = Vec::new();
    for page in 1..=3 {
        joined.extend(paginate(&view, 10, page).items);
    }
    assert_eq!(joined, view);

    let empty = paginate::<u32>(&[], 10, 5);
    assert_eq!(empty.page, 1);
    assert_eq!(empty.total_pages, 1);
    assert!(empty.items.is_empty());
    Ok(())
}

#[test]
fn grouping_keeps_order_then_orphans_then_uncategorized() -> Result<()> {
    let order = vec!["Física".to_string(), "Mental".to_string()];
    let items = vec![
        task("a", "Mental", "", Priority::Low, false),
        task("b", "Antiga", "", Priority::Low, false),
        task("c", "", "", Priority::Low, false),
        task("d", "Física", "", Priority::Low, false),
    ];
    // ids only matter for uniqueness here
    let items: Vec<Task> = items
        .into_iter()
        .enumerate()
        .map(|(i, mut t)| {
            t.id = i.to_string();
            t
        })
        .collect();

    let groups = group_by_category(&items, &order);
    let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["Física", "Mental", "Antiga", UNCATEGORIZED]);
    Ok(())
}

#[test]
fn distribution_counts_follow_group_order() -> Result<()> {
    let order = vec!["Física".to_string(), "Mental".to_string()];
    let items: Vec<Task> = [
        task("a", "Mental", "", Priority::Low, false),
        task("b", "Física", "", Priority::Low, false),
        task("c", "Física", "", Priority::Low, true),
        task("d", "", "", Priority::Low, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, mut t)| {
        t.id = i.to_string();
        t
    })
    .collect();

    let (labels, series) = category_distribution(&items, &order);
    assert_eq!(labels, ["Física", "Mental", UNCATEGORIZED]);
    assert_eq!(series, [2, 1, 1]);

    let (labels, series) = category_distribution::<Task>(&[], &order);
    assert!(labels.is_empty());
    assert!(series.is_empty());
    Ok(())
}
