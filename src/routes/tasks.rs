use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves all tasks, newest first.
///
/// The board is shared: results are not filtered by the requesting user.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(store: web::Data<dyn TaskStore>) -> Result<impl Responder, AppError> {
    let tasks = store.list().await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by its ID.
///
/// ## Responses:
/// - `200 OK`: the `Task` object.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no task with this ID.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = store.get(task_id.into_inner()).await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Creates a new task.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description` (optional).
/// - `status` (optional): "pending" or "completed", defaults to "pending".
///
/// ## Responses:
/// - `201 Created`: the created `Task`.
/// - `400 Bad Request`: malformed body or failed validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn TaskStore>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = store.insert(Task::new(task_data.into_inner())).await?;
    log::debug!("user {} created task {}", user.0, task.id);

    Ok(HttpResponse::Created().json(task))
}

/// Updates an existing task with a partial field set.
///
/// Fields absent from the body keep their stored value; a status outside
/// "pending"/"completed" is rejected before the handler runs.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: malformed body or failed validation.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no task with this ID.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task_uuid = task_id.into_inner();
    let task = store.update(task_uuid, task_data.into_inner()).await?;
    log::debug!("user {} updated task {}", user.0, task_uuid);

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no task with this ID.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();

    if !store.delete(task_uuid).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    log::debug!("user {} deleted task {}", user.0, task_uuid);

    Ok(HttpResponse::NoContent().finish())
}
