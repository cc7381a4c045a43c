// Copyright 2018-2021 Cargill Incorporated
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


use super::TransactionStoreOperations;
use crate::transactions::store::diesel::schema::history_transaction_participants;
use crate::transactions::store::{TransactionParticipant, TransactionStoreError};

use diesel::{dsl::insert_into, prelude::*};

pub(in crate::transactions::store::diesel) trait TransactionStoreAddTransactionParticipantsOperation {
    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError>;
}

#[cfg(feature = "postgres")]
impl<'a> TransactionStoreAddTransactionParticipantsOperation
    for TransactionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            for participant in participants {
                insert_into(history_transaction_participants::table)
                    .values((
                        history_transaction_participants::history_transaction_id
                            .eq(participant.history_transaction_id),
                        history_transaction_participants::history_account_id
                            .eq(participant.history_account_id),
                    ))
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }
}

#[cfg(feature = "sqlite")]
impl<'a> TransactionStoreAddTransactionParticipantsOperation
    for TransactionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_transaction_participants(
        &self,
        participants: &[TransactionParticipant],
    ) -> Result<(), TransactionStoreError> {
        self.conn.transaction::<_, TransactionStoreError, _>(|| {
            for participant in participants {
                insert_into(history_transaction_participants::table)
                    .values((
                        history_transaction_participants::history_transaction_id
                            .eq(participant.history_transaction_id),
                        history_transaction_participants::history_account_id
                            .eq(participant.history_account_id),
                    ))
                    .execute(self.conn)?;
            }

            Ok(())
        })
    }
}
