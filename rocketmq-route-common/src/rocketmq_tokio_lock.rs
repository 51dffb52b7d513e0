// Copyright 2023 The RocketMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

/// Async mutex whose acquisition can be bounded by a timeout.
pub struct RocketMQTokioMutex<T: ?Sized> {
    lock: tokio::sync::Mutex<T>,
}

impl<T: ?Sized> RocketMQTokioMutex<T> {
    pub fn new(data: T) -> Self
    where
        T: Sized,
    {
        Self {
            lock: tokio::sync::Mutex::new(data),
        }
    }

    /// Acquires the lock, waiting as long as it takes.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, T> {
        self.lock.lock().await
    }

    /// Returns `None` if the lock is currently held.
    pub fn try_lock(&self) -> Option<tokio::sync::MutexGuard<'_, T>> {
        self.lock.try_lock().ok()
    }

    /// Waits for the lock for at most `timeout`.
    ///
    /// Returns `None` if the timeout expired first.
    pub async fn try_lock_timeout(&self, timeout: Duration) -> Option<tokio::sync::MutexGuard<'_, T>> {
        (tokio::time::timeout(timeout, self.lock.lock()).await).ok()
    }
}

impl<T> Default for RocketMQTokioMutex<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Async read-write lock whose acquisition can be bounded by a timeout.
pub struct RocketMQTokioRwLock<T: ?Sized> {
    lock: tokio::sync::RwLock<T>,
}

impl<T: ?Sized> RocketMQTokioRwLock<T> {
    pub fn new(data: T) -> Self
    where
        T: Sized,
    {
        Self {
            lock: tokio::sync::RwLock::new(data),
        }
    }

    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, T> {
        self.lock.read().await
    }

    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, T> {
        self.lock.write().await
    }

    /// Waits for shared access for at most `timeout`.
    pub async fn try_read_timeout(&self, timeout: Duration) -> Option<tokio::sync::RwLockReadGuard<'_, T>> {
        (tokio::time::timeout(timeout, self.lock.read()).await).ok()
    }

    /// Waits for exclusive access for at most `timeout`.
    pub async fn try_write_timeout(&self, timeout: Duration) -> Option<tokio::sync::RwLockWriteGuard<'_, T>> {
        (tokio::time::timeout(timeout, self.lock.write()).await).ok()
    }
}

impl<T> Default for RocketMQTokioRwLock<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
