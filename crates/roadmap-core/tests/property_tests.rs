use proptest::prelude::*;
use roadmap_core::{RoadmapStore, TaskId};
use roadmap_test_utils::roadmap_strategy;

proptest! {
    #[test]
    fn prop_totals_are_consistent(roadmap in roadmap_strategy()) {
        let store = RoadmapStore::new(&roadmap);
        let stats = store.statistics();

        prop_assert_eq!(stats.total, store.all_tasks().count());
        prop_assert_eq!(stats.by_priority.total(), stats.total);
        prop_assert!(stats.completed <= stats.total);
    }

    #[test]
    fn prop_percent_in_range(roadmap in roadmap_strategy()) {
        let stats = RoadmapStore::new(&roadmap).statistics();

        prop_assert!(stats.percent <= 100);
        if stats.total == 0 {
            prop_assert_eq!(stats.percent, 0);
        }
    }

    #[test]
    fn prop_delete_task_is_idempotent(roadmap in roadmap_strategy(), id in 0_i64..25) {
        let store = RoadmapStore::new(&roadmap);
        let once = store.delete_task(TaskId(id));
        let twice = once.delete_task(TaskId(id));

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.stages().len(), store.stages().len());
        prop_assert!(once.task(TaskId(id)).is_none());
    }

    #[test]
    fn prop_export_round_trip(roadmap in roadmap_strategy()) {
        let store = RoadmapStore::new(&roadmap);
        let restored = RoadmapStore::from_json(&store.to_json().unwrap()).unwrap();

        prop_assert_eq!(restored.statistics(), store.statistics());
        prop_assert_eq!(
            restored.all_tasks().cloned().collect::<Vec<_>>(),
            store.all_tasks().cloned().collect::<Vec<_>>()
        );
    }

    #[test]
    fn prop_toggle_three_times_restores_status(roadmap in roadmap_strategy(), id in 1_i64..10) {
        let store = RoadmapStore::new(&roadmap);
        let cycled = store
            .toggle_task_status(TaskId(id))
            .toggle_task_status(TaskId(id))
            .toggle_task_status(TaskId(id));

        prop_assert_eq!(
            cycled.task(TaskId(id)).map(|t| t.status),
            store.task(TaskId(id)).map(|t| t.status)
        );
    }
}
