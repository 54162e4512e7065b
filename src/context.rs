use crate::{
    log::trace,
    new_trait::New,
    plan::{PlanId, Queue},
    type_of,
    HashMap,
    TypeId,
};
use std::any::Any;

type Callback = dyn FnOnce(&mut Context);

/// Owns all of the state of a simulation: the typed data plugins (region graph, parameters,
/// random generators, displays, driver state) and the plan queue that moves simulated time
/// forward.
pub struct Context {
    // This is actually a `HashMap<TypeId, Box<dyn New>>` but must be declared this way to avoid
    // having to implement an `as_any()` method on everything.
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
    plan_queue: Queue<Box<Callback>>,
    current_time: f64,
    shutdown_requested: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Context {
            data_plugins: HashMap::default(),
            plan_queue: Queue::new(),
            current_time: 0.0,
            shutdown_requested: false,
        }
    }

    /// Returns a mutable reference for the data container for `T`, creating it if it doesn't
    /// exist yet.
    pub fn get_data_container_mut<T: New>(&mut self) -> &mut T {
        self.data_plugins
            .entry(type_of::<T>())
            .or_insert_with(|| Box::new(<T as New>::new()))
            .downcast_mut::<T>()
            .expect("data container is stored under its own TypeId")
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use
    /// `Context::get_data_container_mut()`.
    pub fn get_data_container<T: New>(&self) -> Option<&T> {
        self.data_plugins
            .get(&type_of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// The simulated time of the plan currently executing, or of the last one executed.
    pub fn get_current_time(&self) -> f64 {
        self.current_time
    }

    /// Schedules `callback` to run at simulated `time`.
    ///
    /// Panics if `time` is earlier than the current time or is not finite.
    pub fn add_plan(&mut self, time: f64, callback: impl FnOnce(&mut Context) + 'static) -> PlanId {
        assert!(time.is_finite(), "plan time must be finite, got {time}");
        assert!(
            time >= self.current_time,
            "cannot schedule a plan at {time}, which is before the current time {}",
            self.current_time
        );
        let plan_id = self.plan_queue.add_plan(time, Box::new(callback));
        trace!("added plan {plan_id:?} at time {time}");
        plan_id
    }

    /// Cancels a pending plan. Returns `false` if the plan already ran or was cancelled.
    pub fn cancel_plan(&mut self, plan_id: &PlanId) -> bool {
        let cancelled = self.plan_queue.cancel_plan(plan_id);
        if cancelled {
            trace!("cancelled plan {plan_id:?}");
        }
        cancelled
    }

    pub fn remaining_plan_count(&self) -> usize {
        self.plan_queue.remaining_plan_count()
    }

    /// Stops `execute()` after the current plan returns. Pending plans are dropped.
    pub fn shutdown(&mut self) {
        trace!("shutdown requested at time {}", self.current_time);
        self.shutdown_requested = true;
    }

    /// Runs plans in time order until the queue is empty or `shutdown()` is called.
    pub fn execute(&mut self) {
        trace!("entering event loop");
        self.shutdown_requested = false;
        loop {
            if self.shutdown_requested {
                self.plan_queue.clear();
                break;
            }
            match self.plan_queue.get_next_plan() {
                Some((time, callback)) => {
                    self.current_time = time;
                    callback(self);
                }
                None => break,
            }
        }
        trace!("event loop finished at time {}", self.current_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn data_containers_are_created_lazily() {
        let mut context = Context::new();
        assert!(context.get_data_container::<Vec<u8>>().is_none());
        {
            let byte_vector: &mut Vec<u8> = context.get_data_container_mut();
            byte_vector.extend([1, 2, 3]);
        }
        {
            let names: &mut Vec<&str> = context.get_data_container_mut();
            names.push("Tachov");
        }

        assert_eq!(context.get_data_container::<Vec<u8>>(), Some(&vec![1, 2, 3]));
        assert_eq!(context.get_data_container::<Vec<&str>>(), Some(&vec!["Tachov"]));
    }

    #[test]
    fn plans_run_in_time_order_and_advance_time() {
        let mut context = Context::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for time in [2.0, 1.0, 3.0] {
            let log = log.clone();
            context.add_plan(time, move |context| {
                log.borrow_mut().push(context.get_current_time());
            });
        }
        context.execute();

        assert_eq!(*log.borrow(), vec![1.0, 2.0, 3.0]);
        assert_eq!(context.get_current_time(), 3.0);
    }

    #[test]
    fn plans_can_schedule_further_plans() {
        let mut context = Context::new();
        let count = Rc::new(RefCell::new(0));

        fn reschedule(context: &mut Context, count: Rc<RefCell<u32>>) {
            *count.borrow_mut() += 1;
            if *count.borrow() < 5 {
                let next = context.get_current_time() + 1.0;
                context.add_plan(next, move |context| reschedule(context, count));
            }
        }

        let first = count.clone();
        context.add_plan(0.0, move |context| reschedule(context, first));
        context.execute();

        assert_eq!(*count.borrow(), 5);
        assert_eq!(context.get_current_time(), 4.0);
    }

    #[test]
    fn cancelled_plans_never_run() {
        let mut context = Context::new();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();
        let plan = context.add_plan(1.0, move |_| *flag.borrow_mut() = true);

        assert!(context.cancel_plan(&plan));
        context.execute();
        assert!(!*ran.borrow());
    }

    #[test]
    fn shutdown_drops_pending_plans() {
        let mut context = Context::new();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();
        context.add_plan(1.0, |context| context.shutdown());
        context.add_plan(2.0, move |_| *flag.borrow_mut() = true);

        context.execute();
        assert!(!*ran.borrow());
        assert_eq!(context.remaining_plan_count(), 0);
    }

    #[test]
    #[should_panic(expected = "before the current time")]
    fn plans_in_the_past_are_rejected() {
        let mut context = Context::new();
        context.add_plan(5.0, |context| {
            context.add_plan(1.0, |_| {});
        });
        context.execute();
    }
}
