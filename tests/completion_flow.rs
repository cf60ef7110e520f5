//! End-to-end completion flows over the in-memory backend: the dashboard
//! scenarios exercised through the public view types only.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use taskdeck::api::MemoryApi;
use taskdeck::model::{Project, ProjectStatus, Subtask, Task, TaskStatus};
use taskdeck::view::{ProjectDetailView, TaskDetailView};

fn subtask(id: &str, task_id: &str, completed: bool) -> Subtask {
    let mut s = Subtask::new(id, format!("step {id}"), task_id);
    s.completed = completed;
    s
}

fn task_in(project_id: &str, id: &str, status: TaskStatus) -> Task {
    let mut t = Task::new(id, format!("task {id}"), "prov-1");
    t.project_id = Some(project_id.to_string());
    t.set_status(status);
    t
}

#[tokio::test]
async fn design_homepage_completes_through_its_last_subtask() {
    let api = Arc::new(MemoryApi::new());
    api.seed_task(Task::new("t-1", "Design Homepage", "prov-1"))
        .await;
    api.seed_subtask(subtask("s-1", "t-1", true)).await;
    api.seed_subtask(subtask("s-2", "t-1", true)).await;
    api.seed_subtask(subtask("s-3", "t-1", false)).await;

    let mut view = TaskDetailView::new(api.clone(), api.task("t-1").await.unwrap());
    view.refresh().await;
    assert!(!view.task.completed);

    view.toggle_subtask("s-3").await.unwrap();

    assert!(view.subtasks.iter().all(|s| s.completed));
    assert!(view.task.completed);
    assert_eq!(view.task.status, TaskStatus::Completed);
    assert!(view.animation.is_active());

    // The backend agrees on every piece.
    assert!(api.subtask("s-3").await.unwrap().completed);
    assert!(api.task("t-1").await.unwrap().completed);
}

#[tokio::test]
async fn website_redesign_completes_with_its_second_task() {
    let api = Arc::new(MemoryApi::new());
    api.seed_project(Project::new("pr-1", "Website Redesign", "prov-1"))
        .await;
    api.seed_task(task_in("pr-1", "t-1", TaskStatus::Completed))
        .await;
    api.seed_task(task_in("pr-1", "t-2", TaskStatus::InProgress))
        .await;

    let mut view = ProjectDetailView::new(api.clone(), api.project("pr-1").await.unwrap());
    view.refresh().await;
    assert_eq!(view.project.status, ProjectStatus::InProgress);

    view.set_task_status("t-2", TaskStatus::Completed)
        .await
        .unwrap();

    assert_eq!(view.project.status, ProjectStatus::Completed);
    assert_eq!(
        api.project("pr-1").await.unwrap().status,
        ProjectStatus::Completed
    );
}

#[tokio::test]
async fn rejected_drag_lands_back_exactly_where_it_started() {
    let api = Arc::new(MemoryApi::new());
    api.seed_project(Project::new("pr-1", "Website Redesign", "prov-1"))
        .await;
    api.seed_task(task_in("pr-1", "t-1", TaskStatus::Todo)).await;
    api.seed_task(task_in("pr-1", "t-2", TaskStatus::Review))
        .await;

    let mut view = ProjectDetailView::new(api.clone(), api.project("pr-1").await.unwrap());
    view.refresh().await;
    let before = view.tasks.clone();

    view.begin_drag("t-1");
    view.hover_column("in-progress");
    api.fail_next("status update rejected").await;
    let result = view.drop_on_status(TaskStatus::InProgress).await;

    assert!(result.is_err());
    assert_eq!(view.tasks, before);
    assert_eq!(view.error.as_deref(), Some("status update rejected"));
    assert_eq!(view.drag.dragging, None);
    assert_eq!(view.drag.hovered, None);
}

#[tokio::test]
async fn subtask_completion_cascades_all_the_way_to_the_project() {
    let api = Arc::new(MemoryApi::new());
    api.seed_project(Project::new("pr-1", "Website Redesign", "prov-1"))
        .await;
    api.seed_task(task_in("pr-1", "t-1", TaskStatus::Completed))
        .await;
    api.seed_task(task_in("pr-1", "t-2", TaskStatus::InProgress))
        .await;
    api.seed_subtask(subtask("s-1", "t-2", false)).await;

    // Task detail view completes t-2 via its only subtask.
    let mut task_view = TaskDetailView::new(api.clone(), api.task("t-2").await.unwrap());
    task_view.refresh().await;
    task_view.toggle_subtask("s-1").await.unwrap();
    assert!(task_view.task.completed);

    // Project detail view picks the change up on its next fetch and
    // cascades the project itself.
    let mut project_view = ProjectDetailView::new(api.clone(), api.project("pr-1").await.unwrap());
    project_view.refresh().await;

    assert_eq!(project_view.project.status, ProjectStatus::Completed);
    assert_eq!(
        api.project("pr-1").await.unwrap().status,
        ProjectStatus::Completed
    );
}
