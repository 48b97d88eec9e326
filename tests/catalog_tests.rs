use timesheet::core::category::CategoryLogic;
use timesheet::core::clock::FixedClock;
use timesheet::core::task::TaskLogic;
use timesheet::core::work::WorkLogic;
use timesheet::errors::AppError;
use timesheet::models::task::TaskPatch;

mod common;
use common::{memory_pool, seed_task};

#[test]
fn test_category_crud() {
    let mut pool = memory_pool();

    let c = CategoryLogic::create(&mut pool, "  Dev ", Some("Coding work")).unwrap();
    assert_eq!(c.name, "Dev");
    assert_eq!(c.description.as_deref(), Some("Coding work"));

    let renamed = CategoryLogic::update(&mut pool, c.id, Some("Development"), Some(None)).unwrap();
    assert_eq!(renamed.name, "Development");
    assert_eq!(renamed.description, None);
    assert_eq!(CategoryLogic::read(&pool, c.id).unwrap(), renamed);

    assert_eq!(CategoryLogic::list(&pool).unwrap().len(), 1);

    CategoryLogic::delete(&mut pool, c.id).unwrap();
    assert!(matches!(
        CategoryLogic::read(&pool, c.id),
        Err(AppError::NotFound { entity: "Category", .. })
    ));
    assert!(matches!(
        CategoryLogic::delete(&mut pool, c.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_names_are_required_and_unique() {
    let mut pool = memory_pool();

    assert!(matches!(
        CategoryLogic::create(&mut pool, "   ", None),
        Err(AppError::InvalidInput(_))
    ));

    let (category, _) = seed_task(&mut pool, "Dev", "Code");
    assert!(matches!(
        CategoryLogic::create(&mut pool, "Dev", None),
        Err(AppError::Db(_))
    ));
    assert!(matches!(
        TaskLogic::create(&mut pool, "Code", category),
        Err(AppError::Db(_))
    ));
    assert!(matches!(
        TaskLogic::create(&mut pool, "", category),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_task_needs_existing_category() {
    let mut pool = memory_pool();
    assert!(matches!(
        TaskLogic::create(&mut pool, "Orphan", 42),
        Err(AppError::NotFound { entity: "Category", id: 42 })
    ));
}

#[test]
fn test_task_archive_and_move() {
    let mut pool = memory_pool();
    let (_, task) = seed_task(&mut pool, "Dev", "Code");
    let ops = CategoryLogic::create(&mut pool, "Ops", None).unwrap();

    let t = TaskLogic::update(
        &mut pool,
        task,
        &TaskPatch {
            category_id: Some(ops.id),
            is_archived: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(t.category_name, "Ops");
    assert!(t.is_archived);

    assert_eq!(TaskLogic::list(&pool, Some(true)).unwrap().len(), 1);
    assert!(TaskLogic::list(&pool, Some(false)).unwrap().is_empty());
    assert_eq!(TaskLogic::list(&pool, None).unwrap().len(), 1);

    assert!(matches!(
        TaskLogic::update(
            &mut pool,
            task,
            &TaskPatch {
                category_id: Some(99),
                ..Default::default()
            }
        ),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn test_deleting_category_cascades() {
    let mut pool = memory_pool();
    let (category, task) = seed_task(&mut pool, "Dev", "Code");
    WorkLogic::start_work(&mut pool, &FixedClock(100), task, None).unwrap();

    CategoryLogic::delete(&mut pool, category).unwrap();

    assert!(matches!(
        TaskLogic::read(&pool, task),
        Err(AppError::NotFound { .. })
    ));
    assert_eq!(WorkLogic::current(&pool).unwrap(), None);
}
