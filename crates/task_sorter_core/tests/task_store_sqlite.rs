use task_sorter_core::db::{open_db, open_db_in_memory};
use task_sorter_core::{
    open_task_service, BlobStore, BlobTaskStore, Category, SqliteBlobStore, Task, TaskCollection,
    TaskId, TaskStore, TASKS_STORAGE_KEY,
};

fn sample() -> TaskCollection {
    TaskCollection::from_tasks(vec![
        Task::new(TaskId::new("a").unwrap(), "bake bread", Category::Kitchen).unwrap(),
        Task::new(TaskId::new("b").unwrap(), "fix the sink", Category::House).unwrap(),
        Task::new(TaskId::new("c").unwrap(), "apply for the job", Category::Study).unwrap(),
    ])
    .unwrap()
}

#[test]
fn save_then_load_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let store = BlobTaskStore::new(SqliteBlobStore::new(&conn));

    store.save(&sample()).unwrap();
    assert_eq!(store.load().unwrap(), sample());

    store.save(&TaskCollection::new()).unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn tasks_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    {
        let conn = open_db(&path).unwrap();
        let service = open_task_service(&conn);
        service.add("vacuum the stairs").unwrap();
        service.add("preheat oven").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let tasks = open_task_service(&conn).list().unwrap();
    let summary = tasks
        .iter()
        .map(|task| (task.text(), task.category()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("vacuum the stairs", Category::House),
            ("preheat oven", Category::Kitchen),
        ]
    );
}

#[test]
fn corrupt_row_loads_empty() {
    let conn = open_db_in_memory().unwrap();
    let blobs = SqliteBlobStore::new(&conn);
    blobs.put(TASKS_STORAGE_KEY, "definitely not json").unwrap();

    let store = BlobTaskStore::new(&blobs);
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn production_service_generates_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = open_task_service(&conn);

    service.add("mop").unwrap();
    let tasks = service.add("mop").unwrap();

    assert_eq!(tasks.len(), 2);
    assert_ne!(tasks.tasks()[0].id(), tasks.tasks()[1].id());
}
