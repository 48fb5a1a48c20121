use petcare_domain::ID;
use tokio::sync::broadcast;
use tracing::debug;

/// Published after the sdk changed the data of a pet on the server, so that
/// views showing that pet know they should fetch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetChanged {
    pub pet_id: ID,
}

#[derive(Clone)]
pub(crate) struct PetChangeNotifier {
    sender: broadcast::Sender<PetChanged>,
}

impl PetChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PetChanged> {
        self.sender.subscribe()
    }

    pub fn publish(&self, pet_id: ID) {
        // Nobody listening is fine
        if self.sender.send(PetChanged { pet_id }).is_err() {
            debug!("No subscribers for pet change of pet: {}", pet_id);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn publishes_to_every_subscriber() {
        let notifier = PetChangeNotifier::new(4);
        notifier.publish(ID::new(1));

        let mut first = notifier.subscribe();
        let mut second = notifier.clone().subscribe();
        notifier.publish(ID::new(2));

        assert_eq!(first.try_recv().unwrap(), PetChanged { pet_id: ID::new(2) });
        assert_eq!(second.try_recv().unwrap(), PetChanged { pet_id: ID::new(2) });
        assert!(first.try_recv().is_err());
    }
}
