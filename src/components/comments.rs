//! Ticket Comments
//!
//! Comment thread under a ticket. Anyone in the project may post; whether a
//! comment can be deleted is left to the server.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{alert, ConfirmButton};
use crate::api::comments;
use crate::context::use_app_context;
use crate::draft::required;
use crate::liveness::Liveness;
use crate::models::Comment;

#[component]
pub fn Comments(ticket_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (thread, set_thread) = signal(Vec::<Comment>::new());
    let (content, set_content) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (posting, set_posting) = signal(false);

    {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = comments::list_comments(&ctx.api(), ticket_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(loaded) => set_thread.set(loaded),
                Err(err) => set_error.set(Some(err.user_message("Failed to load comments"))),
            }
        });
    }

    let on_submit = {
        let ctx = ctx.clone();
        let alive = alive.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if posting.get_untracked() {
                return;
            }
            let text = content.get_untracked();
            let text = match required(&text, "Comment") {
                Ok(value) => value.to_string(),
                Err(msg) => {
                    set_error.set(Some(msg));
                    return;
                }
            };
            set_error.set(None);
            set_posting.set(true);
            let ctx = ctx.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = comments::add_comment(&ctx.api(), ticket_id, &text).await;
                if !alive.is_alive() {
                    return;
                }
                set_posting.set(false);
                match result {
                    Ok(comment) => {
                        set_content.set(String::new());
                        set_thread.update(|list| list.push(comment));
                    }
                    Err(err) => set_error.set(Some(err.user_message("Failed to add comment"))),
                }
            });
        }
    };

    let remove = Callback::new(move |comment_id: u32| {
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = comments::delete_comment(&ctx.api(), comment_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(_) => set_thread.update(|list| list.retain(|c| c.id != comment_id)),
                Err(err) => alert(&err.user_message("Failed to delete comment")),
            }
        });
    });

    view! {
        <div class="comments">
            <h3>"Comments"</h3>
            <Show
                when=move || !thread.get().is_empty()
                fallback=|| view! { <p class="empty-state">"No comments yet."</p> }
            >
                <ul class="comment-list">
                    <For
                        each=move || thread.get()
                        key=|c| c.id
                        children=move |comment| {
                            let id = comment.id;
                            view! {
                                <li class="comment">
                                    <div class="comment-meta">
                                        <span class="comment-author">{comment.author_label()}</span>
                                        {comment.author_role.map(|r| view! { <span class="comment-role">{r.label()}</span> })}
                                        {comment.created_at.clone().map(|at| view! { <span class="comment-date">{at}</span> })}
                                    </div>
                                    <p class="comment-content">{comment.content.clone()}</p>
                                    <ConfirmButton
                                        label="Delete"
                                        prompt="Delete comment?"
                                        button_class="comment-delete-btn"
                                        on_confirm=Callback::new(move |_: ()| remove.run(id))
                                    />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <form class="comment-form" on:submit=on_submit>
                <textarea
                    placeholder="Add a comment..."
                    prop:value=move || content.get()
                    on:input=move |ev| set_content.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || posting.get()>"Comment"</button>
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            </form>
        </div>
    }
}
