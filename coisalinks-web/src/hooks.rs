//! Async work tied to a component's lifetime.

use futures::future::{AbortHandle, Abortable};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::{Future, ready};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::{hook, use_effect_with, use_memo};

/// Futures that stop when their owner goes away.
///
/// A guarded future that is aborted resolves to `None` without being polled
/// again, so a late response is never applied to an unmounted page. Handles
/// of finished futures are released as soon as they complete.
#[derive(Debug, Default)]
pub struct ScopedTasks {
    handles: Rc<RefCell<HashMap<u64, AbortHandle>>>,
    next_id: Cell<u64>,
}

impl ScopedTasks {
    pub fn guard<F>(&self, future: F) -> impl Future<Output = Option<F::Output>> + use<F>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.handles.borrow_mut().insert(id, handle);
        let handles = Rc::clone(&self.handles);
        async move {
            let output = Abortable::new(future, registration).await.ok();
            handles.borrow_mut().remove(&id);
            output
        }
    }

    /// Run `work` to completion regardless of the scope, then hand its output
    /// to `apply` only if the scope is still alive.
    ///
    /// For work whose own bookkeeping must finish (session changes) while the
    /// page-local follow-up must not outlive the page.
    pub fn detached<W, A>(&self, work: W, apply: A) -> impl Future<Output = ()> + use<W, A>
    where
        W: Future,
        A: FnOnce(W::Output),
    {
        let gate = self.guard(ready(()));
        async move {
            let output = work.await;
            if gate.await.is_some() {
                apply(output);
            } else {
                log::debug!("scope ended before completion, result not applied");
            }
        }
    }

    /// Run `future` on the local executor until it finishes or the scope ends.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let guarded = self.guard(future);
        spawn_local(async move {
            if guarded.await.is_none() {
                log::debug!("scoped task aborted");
            }
        });
    }

    /// Spawn [`ScopedTasks::detached`] on the local executor.
    pub fn spawn_detached<W, A>(&self, work: W, apply: A)
    where
        W: Future + 'static,
        A: FnOnce(W::Output) + 'static,
    {
        spawn_local(self.detached(work, apply));
    }

    pub fn abort_all(&self) {
        for (_, handle) in self.handles.borrow_mut().drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.handles.borrow().len()
    }
}

/// Tasks aborted when the calling component unmounts.
#[hook]
pub fn use_scoped_tasks() -> Rc<ScopedTasks> {
    let tasks = use_memo((), |_| ScopedTasks::default());
    {
        let tasks = Rc::clone(&tasks);
        use_effect_with((), move |_| move || tasks.abort_all());
    }
    tasks
}
