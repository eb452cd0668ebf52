// ascent_core/src/scene/frame.rs
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct FrameState {
    frame: u64,
    waiting: Vec<Waker>,
}

/// Frame clock shared between the game manager and the tasks it runs.
/// Tasks await `next_frame()` to yield until the next rendered frame.
#[derive(Clone, Default)]
pub struct FrameSignal {
    state: Rc<RefCell<FrameState>>,
}

impl FrameSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.state.borrow().frame
    }

    /// Ends the current frame and wakes every task waiting on it.
    pub fn advance(&self) {
        let waiting = {
            let mut state = self.state.borrow_mut();
            state.frame += 1;
            std::mem::take(&mut state.waiting)
        };
        for waker in waiting {
            waker.wake();
        }
    }

    /// Resolves once the frame after the one it is first polled in begins.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            signal: self.clone(),
            target: None,
        }
    }
}

pub struct NextFrame {
    signal: FrameSignal,
    target: Option<u64>,
}

impl Future for NextFrame {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let mut state = this.signal.state.borrow_mut();
        let target = *this.target.get_or_insert(state.frame + 1);

        if state.frame >= target {
            Poll::Ready(())
        } else {
            state.waiting.push(cx.waker().clone());
            Poll::Pending
        }
    }
}
