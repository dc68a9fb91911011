use axum::Form;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tasknest_core::{ApiError, AppError, capitalize};
use tasknest_db::StoreError;
use tracing::{info, instrument};

use crate::context::RequestContext;
use crate::flash::{FlashKind, get_messages, redirect_with_flash};
use crate::handler::render_view;
use crate::state::AppState;
use crate::validator::check_form;
use crate::view_data;

use super::model::{NewTodo, TodoForm, TodoIdQuery, TodoUpdate};

#[instrument(skip_all, fields(user_id = ctx.user.id))]
pub async fn todo_list(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, messages) = get_messages(jar);

    let todos = state
        .todos
        .list_by_owner(ctx.user.id)
        .await
        .map_err(ApiError::from)?;

    let username = capitalize(&ctx.user.username);
    let data = view_data! {
        "title" => format!("| {username}'s Task List"),
        "fromProtected" => true,
        "username" => username,
        "todos" => todos,
        "errMsg" => messages.error,
        "succMsg" => messages.success,
    };

    let page = render_view(state.views.as_ref(), "todo_list", &data)?;
    Ok((jar, page).into_response())
}

pub async fn create_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let data = view_data! {
        "title" => "| Create Todo",
        "fromProtected" => true,
        "username" => capitalize(&ctx.user.username),
    };

    Ok(render_view(state.views.as_ref(), "todo_create", &data)?.into_response())
}

#[instrument(skip_all, fields(user_id = ctx.user.id))]
pub async fn create_todo_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();
    if let Err(message) = check_form(&form) {
        return Ok(redirect_with_flash(jar, FlashKind::Error, message, "/todo"));
    }

    let todo = state
        .todos
        .create(NewTodo {
            created_by: ctx.user.id,
            description: form.description(),
            title: form.title,
        })
        .await
        .map_err(ApiError::from)?;

    info!(todo_id = todo.id, "Task created");
    Ok(redirect_with_flash(
        jar,
        FlashKind::Success,
        "Task successfully created!!",
        "/todo",
    ))
}

#[instrument(skip_all, fields(user_id = ctx.user.id))]
pub async fn edit_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<TodoIdQuery>,
) -> Result<Response, AppError> {
    let id = query.parse()?;

    let todo = state
        .todos
        .get_by_id_for_owner(id, ctx.user.id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => ApiError::not_found(format!("error 404: task #{id} not found")),
            other => ApiError::from(other),
        })?;

    let data = view_data! {
        "title" => format!("| Edit Todo #{id}"),
        "fromProtected" => true,
        "username" => capitalize(&ctx.user.username),
        "taskID" => todo.id,
        "taskTitle" => todo.title,
        "taskDesc" => todo.description.clone().unwrap_or_default(),
        "taskStatus" => todo.status,
        "createdAt" => todo.created_at_in(&ctx.user.timezone),
    };

    Ok(render_view(state.views.as_ref(), "todo_update", &data)?.into_response())
}

#[instrument(skip_all, fields(user_id = ctx.user.id))]
pub async fn edit_todo_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Query(query): Query<TodoIdQuery>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let id = query.parse()?;

    let form = form.trimmed();
    if let Err(message) = check_form(&form) {
        return Ok(redirect_with_flash(
            jar,
            FlashKind::Error,
            message,
            &format!("/edit?id={id}"),
        ));
    }

    let change = TodoUpdate {
        id,
        created_by: ctx.user.id,
        description: form.description(),
        status: form.is_done(),
        title: form.title,
    };

    match state.todos.update(change).await {
        Ok(_) => Ok(redirect_with_flash(
            jar,
            FlashKind::Success,
            "Task successfully updated!!",
            "/todo",
        )),
        Err(StoreError::NotFound) => Ok(redirect_with_flash(
            jar,
            FlashKind::Error,
            format!("something went wrong: task #{id} could not be updated"),
            "/todo",
        )),
        Err(err) => Err(ApiError::from(err).into()),
    }
}

#[instrument(skip_all, fields(user_id = ctx.user.id))]
pub async fn delete_todo(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Query(query): Query<TodoIdQuery>,
) -> Result<Response, AppError> {
    let id = query.parse()?;

    match state.todos.delete_by_id_for_owner(id, ctx.user.id).await {
        Ok(()) => Ok(redirect_with_flash(
            jar,
            FlashKind::Success,
            "Task successfully deleted!!",
            "/todo",
        )),
        Err(StoreError::NoRowsAffected | StoreError::NotFound) => Ok(redirect_with_flash(
            jar,
            FlashKind::Error,
            format!("something went wrong: task #{id} could not be deleted"),
            "/todo",
        )),
        Err(err) => Err(ApiError::from(err).into()),
    }
}
