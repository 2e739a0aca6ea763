//! Given steps for completion cascade BDD scenarios.

use super::world::{CascadeWorld, run_async};
use eisenhower::todo::services::{
    CreateChildTaskRequest, CreateListRequest, CreateTaskRequest,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a todo list named "{name}""#)]
fn todo_list_named(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let list = run_async(
        world
            .lists
            .create_list(CreateListRequest::new(name, "scenario list")),
    )
    .wrap_err("create list in scenario setup")?;
    world.list = Some(list);
    Ok(())
}

#[given(r#"the list has a parent task named "{name}""#)]
fn list_has_parent_task(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let list = world
        .list
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing list in scenario world"))?;

    let parent = run_async(world.tasks.create_task(CreateTaskRequest::new(
        list.id(),
        name,
        "scenario task",
        CascadeWorld::due_date(),
    )))
    .wrap_err("create parent task in scenario setup")?;
    world.parent = Some(parent);
    Ok(())
}

#[given(r#"the parent task has a child task named "{name}""#)]
fn parent_has_child_task(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;

    let child = run_async(world.tasks.create_child_task(CreateChildTaskRequest::new(
        parent.id(),
        name.clone(),
        "scenario child task",
        CascadeWorld::due_date(),
    )))
    .wrap_err("create child task in scenario setup")?;
    world.children.insert(name, child.id());
    Ok(())
}
