use crossbeam_channel as chan;

/// Send half of a [`Queue`].
///
/// [`Queue`]: struct.Queue.html
pub type Sender<T> = chan::Sender<T>;

/// Receive half of a [`Queue`].
///
/// [`Queue`]: struct.Queue.html
pub type Receiver<T> = chan::Receiver<T>;

/// A thread-safe queue of released GPU object IDs.
///
/// Unbounded so that dropping a handle never blocks, no matter how long
/// the factory goes without draining it.
#[derive(Clone)]
pub struct Queue<T> {
    /// Send half of the queue.
    tx: Sender<T>,

    /// Receive half of the queue.
    rx: Receiver<T>,
}

impl<T> Queue<T> {
    /// Constructor.
    pub fn new() -> Self {
        let (tx, rx) = chan::unbounded();
        Self { tx, rx }
    }

    /// Clone the send half of the queue.
    pub fn tx(&self) -> Sender<T> {
        self.tx.clone()
    }

    /// Remove the item from the front of the queue.
    pub fn next(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_arrive_in_send_order() {
        let queue = Queue::new();
        let tx = queue.tx();
        tx.send(3u32).unwrap();
        tx.send(7u32).unwrap();
        assert_eq!(queue.next(), Some(3));
        assert_eq!(queue.next(), Some(7));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn clones_share_the_channel() {
        let queue = Queue::new();
        let other = queue.clone();
        other.tx().send(1u32).unwrap();
        assert_eq!(queue.next(), Some(1));
        assert_eq!(other.next(), None);
    }

    #[test]
    fn send_does_not_block_past_a_thousand_items() {
        let queue = Queue::new();
        let tx = queue.tx();
        for id in 0 .. 4096u32 {
            tx.send(id).unwrap();
        }
        assert_eq!((0 ..).map_while(|_| queue.next()).count(), 4096);
    }
}
