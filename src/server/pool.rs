//! # Pool de Workers
//! src/server/pool.rs
//!
//! Cola FIFO thread-safe y un número fijo de workers que la consumen.
//! El accept loop encola sockets; cada worker toma uno, lo atiende hasta el
//! final y vuelve a esperar.
//!
//! ```text
//! accept → WorkQueue::enqueue → [worker-0 .. worker-N] → handler(item)
//! ```
//!
//! La cola no tiene capacidad máxima: si todos los workers están ocupados,
//! las conexiones esperan su turno.

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Cola FIFO bloqueante
pub struct WorkQueue<T> {
    /// Items pendientes y bandera de cierre
    state: Arc<Mutex<QueueState<T>>>,

    /// Condvar para despertar workers cuando llega un item o se cierra
    condvar: Arc<Condvar>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
            })),
            condvar: Arc::new(Condvar::new()),
        }
    }

    /// Encola un item
    ///
    /// Si la cola ya fue cerrada retorna el item en el `Err`.
    pub fn enqueue(&self, item: T) -> Result<(), T> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(item);
        }

        state.items.push_back(item);
        self.condvar.notify_one();
        Ok(())
    }

    /// Desencola el item más antiguo
    ///
    /// Bloquea hasta que haya un item. Retorna `None` cuando la cola está
    /// cerrada y vacía.
    pub fn dequeue(&self) -> Option<T> {
        let mut state = self.state.lock();

        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            if state.closed {
                return None;
            }
            self.condvar.wait(&mut state);
        }
    }

    /// Cierra la cola. Los items pendientes se siguen entregando.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.condvar.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for WorkQueue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            condvar: Arc::clone(&self.condvar),
        }
    }
}

/// Número fijo de workers consumiendo una [`WorkQueue`]
///
/// Al hacer drop se cierra la cola y se espera a que los workers terminen
/// lo pendiente.
pub struct WorkerPool<T: Send + 'static> {
    queue: WorkQueue<T>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Lanza `size` workers que ejecutan `handler` por cada item
    pub fn new<F>(size: usize, handler: F) -> io::Result<Self>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let queue = WorkQueue::new();
        let handler = Arc::new(handler);
        let mut workers = Vec::with_capacity(size);

        for i in 0..size {
            let name = format!("worker-{}", i);
            let worker_queue = queue.clone();
            let handler = Arc::clone(&handler);

            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker_loop(name, worker_queue, handler));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(error) => {
                    // Los workers ya lanzados terminan al cerrar la cola
                    queue_close_and_join(&queue, &mut workers);
                    return Err(error);
                }
            }
        }

        Ok(Self { queue, workers })
    }

    /// Entrega un item al próximo worker libre
    pub fn submit(&self, item: T) -> Result<(), T> {
        self.queue.enqueue(item)
    }

    /// Número de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Cierra la cola y espera a los workers
    pub fn shutdown(mut self) {
        queue_close_and_join(&self.queue, &mut self.workers);
    }
}

impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        queue_close_and_join(&self.queue, &mut self.workers);
    }
}

fn queue_close_and_join<T>(queue: &WorkQueue<T>, workers: &mut Vec<JoinHandle<()>>) {
    queue.close();
    for handle in workers.drain(..) {
        let _ = handle.join();
    }
}

/// Loop principal del worker
fn worker_loop<T, F>(name: String, queue: WorkQueue<T>, handler: Arc<F>)
where
    F: Fn(T) + Send + Sync + 'static,
{
    tracing::debug!(worker = %name, "Worker started");

    while let Some(item) = queue.dequeue() {
        // Un panic en el handler no debe matar al worker
        if panic::catch_unwind(AssertUnwindSafe(|| (*handler)(item))).is_err() {
            tracing::error!(worker = %name, "Worker recovered from a panic while handling a connection");
        }
    }

    tracing::debug!(worker = %name, "Worker stopped");
}
