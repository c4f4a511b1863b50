//! Projects Screen
//!
//! Projects the caller belongs to, plus a form to start a new one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::projects;
use crate::context::use_app_context;
use crate::draft::{optional, required};
use crate::liveness::Liveness;
use crate::models::Project;
use crate::routes::{ProjectPage, Route};

#[component]
pub fn Projects() -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (list, set_list) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    // Load on mount
    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = projects::list_projects(&ctx.api()).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(loaded) => {
                    log::debug!("[PROJECTS] loaded {}", loaded.len());
                    set_list.set(loaded);
                }
                Err(err) => set_load_error.set(Some(err.user_message("Failed to load projects"))),
            }
            set_loading.set(false);
        });
    }

    let open = Callback::new(move |id: u32| {
        ctx.navigate(Route::Project { id, page: ProjectPage::Dashboard })
    });

    view! {
        <div class="projects-page">
            <h2>"Projects"</h2>
            <NewProjectForm />
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading projects..."</p> }
            >
                {move || load_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <Show
                    when=move || !list.get().is_empty() || load_error.get().is_some()
                    fallback=|| view! { <p class="empty-state">"You are not a member of any projects yet."</p> }
                >
                    <ul class="project-list">
                        <For
                            each=move || list.get()
                            key=|p| p.id
                            children=move |project| {
                                let id = project.id;
                                view! {
                                    <li class="project-row" on:click=move |_| open.run(id)>
                                        <span class="project-name">{project.name}</span>
                                        {project.description.map(|d| view! { <span class="project-desc">{d}</span> })}
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

/// Create a project; the creator lands on its dashboard
#[component]
fn NewProjectForm() -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name_value = name.get_untracked();
        let name_value = match required(&name_value, "Project name") {
            Ok(value) => value.to_string(),
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        let description_value = optional(&description.get_untracked()).map(str::to_string);
        set_error.set(None);

        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = projects::create_project(&ctx.api(), &name_value, description_value.as_deref()).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(project) => {
                    log::info!("[PROJECTS] created #{} {}", project.id, project.name);
                    ctx.navigate(Route::Project { id: project.id, page: ProjectPage::Dashboard });
                }
                Err(err) => set_error.set(Some(err.user_message("Failed to create project"))),
            }
        });
    };

    view! {
        <form class="new-project-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Project name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description (optional)"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button type="submit">"Create Project"</button>
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
        </form>
    }
}
