use crate::element::Element;
use crate::store::Store;

/// Something that renders.
pub trait View {
    /// Renders the current state.
    fn body(&self) -> Element;
}

/// A view built from a store over `S`.
pub trait FromStore<'a, S>: Sized {
    /// Creates the view.
    fn from_store(store: Store<'a, S>) -> Self;
}

/// State with a dedicated view type. Implemented by the generated code for
/// every annotated union.
pub trait HasView: Sized {
    /// The view rendering `Self`.
    type View<'a>: crate::View + FromStore<'a, Self>
    where
        Self: 'a;

    /// The view over `store`.
    fn view<'a>(store: Store<'a, Self>) -> Self::View<'a>
    where
        Self: 'a,
    {
        <Self::View<'a> as FromStore<'a, Self>>::from_store(store)
    }

    /// Renders `self` through its view.
    fn render(&self) -> Element {
        Self::view(Store::new(self)).body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: u32,
    }

    struct CounterView<'a> {
        store: Store<'a, Counter>,
    }

    impl<'a> FromStore<'a, Counter> for CounterView<'a> {
        fn from_store(store: Store<'a, Counter>) -> Self {
            Self { store }
        }
    }

    impl View for CounterView<'_> {
        fn body(&self) -> Element {
            Element::text(format!("count: {}", self.store.state().count))
        }
    }

    impl HasView for Counter {
        type View<'a> = CounterView<'a>;
    }

    #[test]
    fn test_render_goes_through_view() {
        let counter = Counter { count: 4 };
        assert_eq!(counter.render(), Element::text("count: 4"));
        assert_eq!(
            Counter::view(Store::new(&counter)).body().to_string(),
            "count: 4"
        );
    }
}
